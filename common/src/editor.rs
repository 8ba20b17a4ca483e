/// Size of `text` once UTF-8 encoded, which is what submissions are scored on.
pub fn utf8_byte_len(text: &str) -> usize {
    text.len()
}

/// Plain copy of the editor contents plus its live byte count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorMirror {
    backing: String,
    byte_len: usize,
}

impl EditorMirror {
    pub fn new(initial: &str) -> Self {
        let mut mirror = Self::default();
        mirror.on_change(initial);
        mirror
    }

    pub fn on_change(&mut self, text: &str) {
        self.backing.clear();
        self.backing.push_str(text);
        self.byte_len = utf8_byte_len(text);
    }

    pub fn backing(&self) -> &str {
        &self.backing
    }

    pub fn byte_len(&self) -> usize {
        self.byte_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multibyte_characters() {
        assert_eq!(utf8_byte_len("a"), 1);
        assert_eq!(utf8_byte_len("é"), 2);
        assert_eq!(utf8_byte_len("€"), 3);
        assert_eq!(utf8_byte_len("print('€')"), 12);
        assert_eq!(utf8_byte_len("🦀"), 4);
    }

    #[test]
    fn test_mirror_tracks_changes() {
        let mut mirror = EditorMirror::new("x=1");
        assert_eq!(mirror.byte_len(), 3);
        assert_eq!(mirror.backing(), "x=1");

        mirror.on_change("s='€'");
        assert_eq!(mirror.backing(), "s='€'");
        assert_eq!(mirror.byte_len(), 7);

        mirror.on_change("");
        assert_eq!(mirror.byte_len(), 0);
    }
}
