//! Default value functions for serde deserialization.
//!
//! These functions forward to constants defined in `hostgate_core::defaults`.

use hostgate_core::defaults;

/// Generate default value functions that forward to hostgate_core::defaults constants.
macro_rules! default_fns {
    ($($fn_name:ident => $const_name:ident : $ty:ty),* $(,)?) => {
        $(
            pub(crate) fn $fn_name() -> $ty {
                defaults::$const_name
            }
        )*
    };
}

/// Generate default value functions that return String from &str constants.
macro_rules! default_string_fns {
    ($($fn_name:ident => $const_name:ident),* $(,)?) => {
        $(
            pub(crate) fn $fn_name() -> String {
                defaults::$const_name.to_string()
            }
        )*
    };
}

default_fns! {
    default_categories_allow_cidr => DEFAULT_CATEGORIES_ALLOW_CIDR: bool,
    default_idp_timeout_secs      => DEFAULT_IDP_TIMEOUT_SECS: u64,
    default_cache_enabled         => DEFAULT_CACHE_ENABLED: bool,
}

default_string_fns! {
    default_idp_provider => DEFAULT_IDP_PROVIDER,
    default_cache_url    => DEFAULT_CACHE_URL,
}
