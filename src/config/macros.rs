/// Configuration macros for zero-repetition config definitions
///
/// This module provides the `config_struct!` macro that allows defining
/// configuration structures with embedded defaults in a single declaration.

/// Define a configuration struct with embedded defaults
///
/// Generates the struct with public fields, a `Default` implementation using
/// the declared values, and serde support with `#[serde(default)]` so a
/// partial TOML file only overrides the keys it names.
///
/// # Example
/// ```rust,ignore
/// config_struct! {
///     pub struct ScannerConfig {
///         token_delay_ms: u64 = 350,
///         scan_interval_secs: u64 = 300,
///     }
/// }
/// ```
#[macro_export]
macro_rules! config_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_name:ident: $field_type:ty = $default_value:expr
            ),*
            $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(default)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field_name: $field_type,
            )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $(
                        $field_name: $default_value,
                    )*
                }
            }
        }
    };
}
