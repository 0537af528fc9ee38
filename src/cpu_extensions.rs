/// SIMD extension of CPU used by the explicit-vector strategies.
/// Specific variants depend on target architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuExtensions {
    /// Portable 4-lane vector type
    None,
    #[cfg(target_arch = "x86_64")]
    /// 256-bit vectors of `f64` of x86_64 architecture
    Avx,
}

impl CpuExtensions {
    /// Returns `true` if your CPU support the extension.
    pub fn is_supported(&self) -> bool {
        match self {
            #[cfg(target_arch = "x86_64")]
            Self::Avx => has_avx(),
            Self::None => true,
        }
    }
}

cfg_if::cfg_if! {
    if #[cfg(target_arch = "x86_64")] {
        impl Default for CpuExtensions {
            fn default() -> Self {
                if has_avx() {
                    Self::Avx
                } else {
                    Self::None
                }
            }
        }
    } else {
        impl Default for CpuExtensions {
            fn default() -> Self {
                Self::None
            }
        }
    }
}

#[cfg(target_arch = "x86_64")]
#[inline]
fn has_avx() -> bool {
    is_x86_feature_detected!("avx")
}
