//! Debug logging for instruction lowering.
//!
//! `debug_lowering!` is feature-gated: without the `debug-lowering` feature
//! it expands to nothing, so lowering pays no runtime cost.

/// Log a lowering step.
///
/// # Examples
///
/// ```ignore
/// debug_lowering!("phi {} in {} -> {}", phi.result, block.id, dst);
/// ```
#[cfg(feature = "debug-lowering")]
#[macro_export]
macro_rules! debug_lowering {
    ($($arg:tt)*) => {
        {
            // core::format_args keeps this no_std-clean; tests print to
            // stderr via std.
            #[cfg(test)]
            {
                extern crate std;
                std::eprintln!("[lower] {}", core::format_args!($($arg)*));
            }
            #[cfg(not(test))]
            {
                let _ = core::format_args!($($arg)*);
            }
        }
    };
}

/// Log a lowering step (disabled; expands to nothing).
#[cfg(not(feature = "debug-lowering"))]
#[macro_export]
macro_rules! debug_lowering {
    ($($arg:tt)*) => {};
}
