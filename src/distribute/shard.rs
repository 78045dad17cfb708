//! Shard key derivation.
//! Block files are bucketed under a subdirectory named by the first three
//! characters of their filename, keeping any single destination directory
//! from growing unboundedly flat.

/// Suffix identifying a consolidated block file.
pub const BLOCK_FILE_SUFFIX: &str = ".nyzoblock";

/// Number of leading filename characters forming the shard key.
pub const SHARD_KEY_CHARS: usize = 3;

/// True if `name` carries the block-file suffix.
pub fn is_block_file_name(name: &str) -> bool {
    name.ends_with(BLOCK_FILE_SUFFIX)
}

/// Shard key for a filename: its first [`SHARD_KEY_CHARS`] characters.
///
/// Characters are Unicode scalar values, so a multibyte name can never be
/// split inside a code point. A name shorter than the key length is used
/// whole; with the 10-character suffix this cannot occur for qualifying
/// files, but the behavior is defined rather than left to truncation.
pub fn shard_key(file_name: &str) -> &str {
    match file_name.char_indices().nth(SHARD_KEY_CHARS) {
        Some((idx, _)) => &file_name[..idx],
        None => file_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_first_three_chars() {
        assert_eq!(shard_key("012345.nyzoblock"), "012");
        assert_eq!(shard_key("abc123.nyzoblock"), "abc");
    }

    #[test]
    fn short_names_use_whole_name() {
        assert_eq!(shard_key("ab"), "ab");
        assert_eq!(shard_key(""), "");
    }

    #[test]
    fn multibyte_names_split_on_char_boundary() {
        // Three characters, not three bytes.
        assert_eq!(shard_key("åäö123.nyzoblock"), "åäö");
    }

    #[test]
    fn bare_suffix_qualifies_and_shards() {
        assert!(is_block_file_name(".nyzoblock"));
        assert_eq!(shard_key(".nyzoblock"), ".ny");
    }

    #[test]
    fn suffix_matching_is_exact() {
        assert!(is_block_file_name("000000.nyzoblock"));
        assert!(!is_block_file_name("000000.nyzoblock.bak"));
        assert!(!is_block_file_name("000000.NYZOBLOCK"));
        assert!(!is_block_file_name("readme.txt"));
    }
}
