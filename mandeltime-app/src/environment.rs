//! Start-up banner describing the build and host.

use std::thread;

/// Lines printed before the timed renders.
pub fn banner() -> Vec<String> {
    let threads = thread::available_parallelism().map_or(1, |n| n.get());
    vec![
        format!(
            "{} {} ({} build)",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            if cfg!(debug_assertions) { "debug" } else { "release" },
        ),
        format!(
            "OS : {} ({}, {})",
            std::env::consts::OS,
            std::env::consts::ARCH,
            std::env::consts::FAMILY
        ),
        format!("Available threads : {threads}"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_names_package_and_os() {
        let lines = banner();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("mandeltime-app "));
        assert!(lines[1].contains(std::env::consts::OS));
        assert!(lines[2].starts_with("Available threads : "));
    }
}
