/// Log a line on the diagnostic channel
///
/// Compiled to nothing unless the `diagnostics` feature is enabled.
macro_rules! diagnostic {
	($($arg:tt)*) => {
		if cfg!(feature = "diagnostics") {
			log::info!($($arg)*);
		}
	};
}
