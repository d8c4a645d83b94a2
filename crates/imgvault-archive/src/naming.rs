//! Archive entry names.

/// Length of the random identifier in an entry name.
///
/// 16 symbols from a 64-symbol alphabet give 2^96 combinations, so collisions
/// inside one archive are not checked for.
pub const NAME_ID_LEN: usize = 16;

/// Mint `<id>.<extension>` with a fresh URL-safe random id.
///
/// Every call draws from the thread-local CSPRNG; there is no shared state.
pub fn allocate_name(extension: &str) -> String {
    format!("{}.{extension}", nanoid::nanoid!(NAME_ID_LEN))
}
