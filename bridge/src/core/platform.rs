//! Host platform table: executable lookup and URL/file open commands.

/// Host operating system families the bridge distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Darwin,
    Linux,
    Win32,
    Other,
}

impl Platform {
    /// Platform of the running process.
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` value to a platform.
    pub fn from_os(os: &str) -> Self {
        match os {
            "macos" => Platform::Darwin,
            "linux" => Platform::Linux,
            "windows" => Platform::Win32,
            _ => Platform::Other,
        }
    }

    /// Command that prints the absolute path of an executable on `PATH`.
    pub fn lookup_command(self) -> &'static str {
        match self {
            Platform::Win32 => "where",
            Platform::Darwin | Platform::Linux | Platform::Other => "which",
        }
    }

    /// Command that opens a URL or file with the default handler.
    pub fn open_command(self) -> &'static str {
        match self {
            Platform::Darwin => "open",
            Platform::Win32 => "start",
            Platform::Linux | Platform::Other => "xdg-open",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_table_per_platform() {
        let table = [
            (Platform::Darwin, "which", "open"),
            (Platform::Linux, "which", "xdg-open"),
            (Platform::Win32, "where", "start"),
            (Platform::Other, "which", "xdg-open"),
        ];
        for (platform, lookup, open) in table {
            assert_eq!(platform.lookup_command(), lookup, "{platform:?}");
            assert_eq!(platform.open_command(), open, "{platform:?}");
        }
    }

    #[test]
    fn unknown_os_falls_back_to_other() {
        assert_eq!(Platform::from_os("freebsd"), Platform::Other);
        assert_eq!(Platform::from_os("macos"), Platform::Darwin);
        assert_eq!(Platform::from_os("windows"), Platform::Win32);
    }
}
