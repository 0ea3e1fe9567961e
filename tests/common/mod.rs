//! Shared fixtures for packaging integration tests.
//!
//! [`FakeRunner`] records every tool invocation and imitates the outputs of
//! the real tools on disk, so each packager can run end to end without them.

#![allow(dead_code)]

use release_packager::bundler::{
    Arch, Error, PackageSettings, PackagingOptions, PackagingOptionsBuilder, PackagingTarget,
    Result, ToolInvocation, ToolRunner,
};
use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::Mutex,
    time::Duration,
};
use tempfile::TempDir;

/// One recorded invocation.
#[derive(Clone, Debug)]
pub struct Call {
    pub tool: String,
    pub program: PathBuf,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    /// Engine configuration as read while the engine "ran"
    pub config: Option<serde_json::Value>,
}

/// Records invocations and writes the files each real tool would produce.
pub struct FakeRunner {
    calls: Mutex<Vec<Call>>,
    failing: HashSet<String>,
    delays: HashMap<String, Duration>,
    snaps_produced: usize,
}

impl Default for FakeRunner {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failing: HashSet::new(),
            delays: HashMap::new(),
            snaps_produced: 1,
        }
    }
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `tool` exit non-zero without producing anything.
    pub fn failing(mut self, tool: &str) -> Self {
        self.failing.insert(tool.to_string());
        self
    }

    /// Makes `tool` take `delay` before it produces anything.
    pub fn delayed(mut self, tool: &str, delay: Duration) -> Self {
        self.delays.insert(tool.to_string(), delay);
        self
    }

    /// Number of `.snap` files the fake snapcraft writes.
    pub fn snaps_produced(mut self, count: usize) -> Self {
        self.snaps_produced = count;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn tools(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.tool).collect()
    }

    pub fn count(&self, tool: &str) -> usize {
        self.calls().iter().filter(|c| c.tool == tool).count()
    }

    fn produce(&self, invocation: &ToolInvocation, args: &[String]) -> Option<serde_json::Value> {
        match invocation.tool() {
            // build --prepackaged <dist_path> <arch> --config <file>
            "electron-builder" => {
                let dist_root = Path::new(&args[2]).parent().unwrap().to_path_buf();
                std::fs::write(dist_root.join("GitHubDesktop-1.0.0.deb"), b"deb package").unwrap();
                std::fs::write(dist_root.join("GitHubDesktop-1.0.0.x86_64.rpm"), b"rpm package")
                    .unwrap();
                None
            }
            "snapcraft" => {
                let cwd = invocation.working_dir().unwrap();
                for i in 0..self.snaps_produced {
                    std::fs::write(
                        cwd.join(format!("github-desktop_1.0.{i}_amd64.snap")),
                        b"snap package",
                    )
                    .unwrap();
                }
                None
            }
            // --config <file>
            "installer-engine" => {
                let contents = std::fs::read_to_string(&args[1]).unwrap();
                let config: serde_json::Value = serde_json::from_str(&contents).unwrap();
                let out = PathBuf::from(config["outputDirectory"].as_str().unwrap());
                for name in [
                    config["setupExe"].as_str().unwrap(),
                    config["setupMsi"].as_str().unwrap(),
                    "GitHubDesktop-1.0.0-full.nupkg",
                    "RELEASES",
                ] {
                    std::fs::write(out.join(name), name.as_bytes()).unwrap();
                }
                Some(config)
            }
            // -ck --keepParent <app> <dest>
            "ditto" => {
                std::fs::write(&args[3], b"zip archive").unwrap();
                None
            }
            _ => None,
        }
    }
}

impl ToolRunner for FakeRunner {
    async fn run(&self, invocation: &ToolInvocation) -> Result<()> {
        let args: Vec<String> = invocation
            .arguments()
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        if let Some(delay) = self.delays.get(invocation.tool()) {
            tokio::time::sleep(*delay).await;
        }

        let failing = self.failing.contains(invocation.tool());
        let config = if failing {
            None
        } else {
            self.produce(invocation, &args)
        };

        self.calls.lock().unwrap().push(Call {
            tool: invocation.tool().to_string(),
            program: invocation.program().to_path_buf(),
            args,
            cwd: invocation.working_dir().map(Path::to_path_buf),
            config,
        });

        if failing {
            return Err(Error::ExternalTool {
                tool: invocation.tool().to_string(),
                code: Some(1),
                output: format!("{} exploded", invocation.tool()),
            });
        }
        Ok(())
    }
}

/// A repository root in a temporary directory.
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn builder(&self, target: PackagingTarget) -> PackagingOptionsBuilder {
        PackagingOptionsBuilder::new()
            .repository_root(self.root())
            .target(target)
            .arch(Arch::X86_64)
            .package_settings(PackageSettings {
                product_name: "GitHub Desktop".into(),
                version: "1.0.0".into(),
                company_name: "GitHub, Inc.".into(),
            })
    }

    pub fn options(&self, target: PackagingTarget) -> PackagingOptions {
        self.builder(target).build().unwrap()
    }

    /// Creates the prebuilt application directory.
    pub fn dist_path(&self, options: &PackagingOptions) -> PathBuf {
        std::fs::create_dir_all(options.dist_path()).unwrap();
        options.dist_path().to_path_buf()
    }

    /// Windows design assets and the prebuilt directory.
    pub fn windows_assets(&self, options: &PackagingOptions) {
        self.dist_path(options);
        let windows = options.windows();
        write(&windows.setup_icon, b"ico");
        write(&windows.splash_image, b"gif");
    }

    /// Linux icon, builder configuration and the prebuilt directory.
    pub fn linux_assets(&self, options: &PackagingOptions) {
        self.dist_path(options);
        let linux = options.linux();
        write(&linux.icon, b"png");
        write(&linux.builder_config, b"appId: com.github.GitHubClient\n");
    }

    /// The prebuilt `.app` bundle.
    pub fn app_bundle(&self, options: &PackagingOptions) {
        std::fs::create_dir_all(options.app_bundle().join("Contents")).unwrap();
    }
}

pub fn write(path: &Path, contents: &[u8]) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
