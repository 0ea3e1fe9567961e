//! Code signing certificate lifecycle.
//!
//! On Windows CI machines the signing certificate is written to disk by a
//! setup script and must be removed again by a cleanup script. The certificate
//! is a short-lived secret: cleanup runs exactly once, after the guarded work
//! settles, on success, failure and panic alike.

use crate::bundler::{
    error::Result,
    settings::SigningSettings,
    utils::process::{ToolInvocation, ToolRunner},
};
use futures_lite::FutureExt;
use std::{future::Future, panic::AssertUnwindSafe};

/// Tool name of the certificate provisioning step.
pub const CERTIFICATE_SETUP_TOOL: &str = "certificate-setup";

/// Tool name of the certificate removal step.
pub const CERTIFICATE_TEARDOWN_TOOL: &str = "certificate-teardown";

/// Runs `work` with the signing certificate provisioned.
///
/// When `provision` is set the setup script runs first; its failure is
/// treated like a failure of `work`. The cleanup script always runs once
/// afterwards.
///
/// # Errors
///
/// - the error of `work` (or setup), even if cleanup also fails; the cleanup
///   error is logged
/// - the cleanup error, if `work` succeeded
pub async fn with_certificate<R, F, T>(
    runner: &R,
    signing: &SigningSettings,
    provision: bool,
    work: F,
) -> Result<T>
where
    R: ToolRunner,
    F: Future<Output = Result<T>>,
{
    let guarded = async {
        if provision {
            log::info!("Provisioning signing certificate");
            runner.run(&setup_invocation(signing)).await?;
        }
        work.await
    };

    let outcome = AssertUnwindSafe(guarded).catch_unwind().await;
    let teardown = runner.run(&teardown_invocation(signing)).await;

    match outcome {
        Ok(Ok(value)) => {
            teardown?;
            log::info!("✓ Signing certificate removed");
            Ok(value)
        }
        Ok(Err(e)) => {
            if let Err(cleanup_error) = teardown {
                log::error!("Certificate cleanup failed: {}", cleanup_error);
            }
            Err(e)
        }
        Err(panic) => {
            if let Err(cleanup_error) = teardown {
                log::error!("Certificate cleanup failed: {}", cleanup_error);
            }
            std::panic::resume_unwind(panic)
        }
    }
}

fn setup_invocation(signing: &SigningSettings) -> ToolInvocation {
    ToolInvocation::new(CERTIFICATE_SETUP_TOOL, "powershell")
        .arg(&signing.setup_script)
        .capture_output()
}

fn teardown_invocation(signing: &SigningSettings) -> ToolInvocation {
    ToolInvocation::new(CERTIFICATE_TEARDOWN_TOOL, "powershell")
        .arg(&signing.cleanup_script)
        .capture_output()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::error::Error;
    use std::{path::PathBuf, sync::Mutex};
    use url::Url;

    #[derive(Default)]
    struct ScriptLog {
        calls: Mutex<Vec<String>>,
        fail_teardown: bool,
    }

    impl ToolRunner for ScriptLog {
        async fn run(&self, invocation: &ToolInvocation) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(invocation.tool().to_string());
            if self.fail_teardown && invocation.tool() == CERTIFICATE_TEARDOWN_TOOL {
                return Err(Error::ExternalTool {
                    tool: invocation.tool().into(),
                    code: Some(1),
                    output: "access denied".into(),
                });
            }
            Ok(())
        }
    }

    fn signing() -> SigningSettings {
        SigningSettings {
            certificate_path: PathBuf::from("script/windows-certificate.pfx"),
            timestamp_url: Url::parse("http://timestamp.digicert.com").unwrap(),
            digest_algorithm: "sha256".into(),
            setup_script: PathBuf::from("script/setup-windows-certificate.ps1"),
            cleanup_script: PathBuf::from("script/cleanup-windows-certificate.ps1"),
        }
    }

    #[tokio::test]
    async fn teardown_after_success() {
        let runner = ScriptLog::default();
        let value = with_certificate(&runner, &signing(), true, async { Ok(7) })
            .await
            .unwrap();

        assert_eq!(value, 7);
        assert_eq!(
            *runner.calls.lock().unwrap(),
            vec![CERTIFICATE_SETUP_TOOL, CERTIFICATE_TEARDOWN_TOOL]
        );
    }

    #[tokio::test]
    async fn teardown_after_failure_keeps_original_error() {
        let runner = ScriptLog {
            fail_teardown: true,
            ..Default::default()
        };
        let err = with_certificate(&runner, &signing(), false, async {
            Err::<(), _>(Error::GenericError("engine exploded".into()))
        })
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "engine exploded");
        assert_eq!(*runner.calls.lock().unwrap(), vec![CERTIFICATE_TEARDOWN_TOOL]);
    }

    #[tokio::test]
    async fn teardown_failure_after_success_is_fatal() {
        let runner = ScriptLog {
            fail_teardown: true,
            ..Default::default()
        };
        let err = with_certificate(&runner, &signing(), true, async { Ok(()) })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ExternalTool { ref tool, .. } if tool == CERTIFICATE_TEARDOWN_TOOL));
    }

    async fn exploding_engine() -> Result<()> {
        panic!("engine panicked")
    }

    #[tokio::test]
    async fn teardown_after_panic() {
        let runner = ScriptLog::default();
        let result = AssertUnwindSafe(with_certificate(
            &runner,
            &signing(),
            false,
            exploding_engine(),
        ))
        .catch_unwind()
        .await;

        assert!(result.is_err());
        assert_eq!(*runner.calls.lock().unwrap(), vec![CERTIFICATE_TEARDOWN_TOOL]);
    }
}
