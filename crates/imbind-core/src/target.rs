use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetOs {
    Windows,
    Linux,
    Darwin,
}

impl TargetOs {
    /// Spelling used by `ODIN_OS`.
    pub fn odin_name(&self) -> &'static str {
        match self {
            TargetOs::Windows => "Windows",
            TargetOs::Linux => "Linux",
            TargetOs::Darwin => "Darwin",
        }
    }

    pub fn library_extension(&self) -> &'static str {
        match self {
            TargetOs::Windows => "lib",
            TargetOs::Linux | TargetOs::Darwin => "a",
        }
    }

    pub fn host() -> Option<Self> {
        match std::env::consts::OS {
            "windows" => Some(TargetOs::Windows),
            "linux" => Some(TargetOs::Linux),
            "macos" => Some(TargetOs::Darwin),
            _ => None,
        }
    }
}

impl fmt::Display for TargetOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetOs::Windows => write!(f, "windows"),
            TargetOs::Linux => write!(f, "linux"),
            TargetOs::Darwin => write!(f, "darwin"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetArch {
    X64,
    Arm64,
}

impl TargetArch {
    /// Spelling used by `ODIN_ARCH`.
    pub fn odin_name(&self) -> &'static str {
        match self {
            TargetArch::X64 => "amd64",
            TargetArch::Arm64 => "arm64",
        }
    }

    pub fn host() -> Option<Self> {
        match std::env::consts::ARCH {
            "x86_64" => Some(TargetArch::X64),
            "aarch64" => Some(TargetArch::Arm64),
            _ => None,
        }
    }
}

impl fmt::Display for TargetArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetArch::X64 => write!(f, "x64"),
            TargetArch::Arm64 => write!(f, "arm64"),
        }
    }
}

/// A platform the native library is archived for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkTarget {
    pub os: TargetOs,
    pub arch: TargetArch,
}

impl LinkTarget {
    pub const fn new(os: TargetOs, arch: TargetArch) -> Self {
        Self { os, arch }
    }

    pub fn host() -> Option<Self> {
        Some(Self::new(TargetOs::host()?, TargetArch::host()?))
    }

    /// `<library>_<os>_<arch>.<ext>`, e.g. `imgui_linux_x64.a`.
    pub fn artifact_name(&self, library: &str) -> String {
        format!(
            "{}_{}_{}.{}",
            library,
            self.os,
            self.arch,
            self.os.library_extension()
        )
    }
}

impl fmt::Display for LinkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os, self.arch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_names() {
        let windows = LinkTarget::new(TargetOs::Windows, TargetArch::X64);
        let linux = LinkTarget::new(TargetOs::Linux, TargetArch::X64);
        let mac_arm = LinkTarget::new(TargetOs::Darwin, TargetArch::Arm64);

        assert_eq!(windows.artifact_name("imgui"), "imgui_windows_x64.lib");
        assert_eq!(linux.artifact_name("imgui"), "imgui_linux_x64.a");
        assert_eq!(mac_arm.artifact_name("imgui"), "imgui_darwin_arm64.a");
    }

    #[test]
    fn test_odin_spellings() {
        assert_eq!(TargetOs::Darwin.odin_name(), "Darwin");
        assert_eq!(TargetArch::X64.odin_name(), "amd64");
        assert_eq!(
            LinkTarget::new(TargetOs::Linux, TargetArch::Arm64).to_string(),
            "linux-arm64"
        );
    }
}
