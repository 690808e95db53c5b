// Logging backend: stderr under test, defmt on hardware, nothing otherwise.
// Exported so the firmware binary logs through the same four levels.
cfg_if::cfg_if! {
    if #[cfg(test)] {
        #[macro_export]
        macro_rules! debug {
            ($($arg:tt)*) => {
                std::eprintln!("DEBUG: {}", format_args!($($arg)*))
            };
        }

        #[macro_export]
        macro_rules! info {
            ($($arg:tt)*) => {
                std::eprintln!("INFO: {}", format_args!($($arg)*))
            };
        }

        #[macro_export]
        macro_rules! warn {
            ($($arg:tt)*) => {
                std::eprintln!("WARN: {}", format_args!($($arg)*))
            };
        }

        #[macro_export]
        macro_rules! error {
            ($($arg:tt)*) => {
                std::eprintln!("ERROR: at ./{}:{}: {}", file!(), line!(), format_args!($($arg)*))
            };
        }
    } else if #[cfg(feature = "defmt")] {
        #[macro_export]
        macro_rules! debug {
            ($($arg:tt)*) => {
                defmt::debug!($($arg)*)
            };
        }

        #[macro_export]
        macro_rules! info {
            ($($arg:tt)*) => {
                defmt::info!($($arg)*)
            };
        }

        #[macro_export]
        macro_rules! warn {
            ($($arg:tt)*) => {
                defmt::warn!($($arg)*)
            };
        }

        #[macro_export]
        macro_rules! error {
            ($($arg:tt)*) => {
                defmt::error!($($arg)*)
            };
        }
    } else {
        #[macro_export]
        macro_rules! debug {
            ($($arg:expr),* $(,)?) => {{ let _ = ($($arg),*); }};
        }

        #[macro_export]
        macro_rules! info {
            ($($arg:expr),* $(,)?) => {{ let _ = ($($arg),*); }};
        }

        #[macro_export]
        macro_rules! warn {
            ($($arg:expr),* $(,)?) => {{ let _ = ($($arg),*); }};
        }

        #[macro_export]
        macro_rules! error {
            ($($arg:expr),* $(,)?) => {{ let _ = ($($arg),*); }};
        }
    }
}
