//! Mapping from host architecture names to RPM architecture tags.

use crate::core::SpecqError;

/// Map a CPU architecture name to the tag `rpmspec --target` expects.
///
/// Accepts both Rust (`std::env::consts::ARCH`) and Go style names, so
/// configuration written for either toolchain works unchanged.
///
/// ```
/// use specq::rpm::arch::rpm_arch;
///
/// assert_eq!(rpm_arch("amd64").unwrap(), "x86_64");
/// assert_eq!(rpm_arch("aarch64").unwrap(), "aarch64");
/// assert!(rpm_arch("mips").is_err());
/// ```
pub fn rpm_arch(arch: &str) -> Result<String, SpecqError> {
    let rpm = match arch {
        "x86_64" | "amd64" => "x86_64",
        "aarch64" | "arm64" => "aarch64",
        _ => {
            return Err(SpecqError::UnsupportedArchitecture {
                arch: arch.to_string(),
            });
        }
    };
    Ok(rpm.to_string())
}

/// RPM architecture of the machine specq runs on.
pub fn host_rpm_arch() -> Result<String, SpecqError> {
    rpm_arch(std::env::consts::ARCH)
}
