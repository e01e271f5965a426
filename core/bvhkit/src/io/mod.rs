use std::str::SplitWhitespace;

/// Saved position of a [`TextStream`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checkpoint(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based
    pub number: usize,
    pub text: &'a str,
}

impl<'a> Line<'a> {
    pub fn tokens(&self) -> SplitWhitespace<'a> {
        self.text.split_whitespace()
    }
}

/// Line cursor over a text document.
///
/// Blank lines are skipped. The position can be saved with [`TextStream::checkpoint`]
/// and restored with [`TextStream::rewind`] to try another grammar rule.
#[derive(Clone, Debug)]
pub struct TextStream<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> TextStream<'a> {
    pub fn new(text: &'a str) -> TextStream<'a> {
        TextStream {
            // Handles both \n and \r\n
            lines: text.lines().collect(),
            pos: 0,
        }
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.pos)
    }

    pub fn rewind(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.0.min(self.lines.len());
    }

    pub fn next_line(&mut self) -> Option<Line<'a>> {
        while let Some(text) = self.lines.get(self.pos).copied() {
            self.pos += 1;

            if !text.trim().is_empty() {
                return Some(Line {
                    number: self.pos,
                    text,
                });
            }
        }

        None
    }

    pub fn peek_line(&self) -> Option<Line<'a>> {
        self.clone().next_line()
    }

    /// True when only blank lines remain
    pub fn is_eof(&self) -> bool {
        self.lines[self.pos.min(self.lines.len())..]
            .iter()
            .all(|l| l.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use rstest::*;
    use super::*;

    #[rstest]
    fn skips_blank_lines() {
        let mut stream = TextStream::new("a\n\n   \r\nb c\r\n");

        assert_eq!(Some(Line { number: 1, text: "a" }), stream.next_line());

        let line = stream.next_line().unwrap();
        assert_eq!(4, line.number);
        assert_eq!(vec!["b", "c"], line.tokens().collect::<Vec<_>>());

        assert_eq!(None, stream.next_line());
        assert!(stream.is_eof());
    }

    #[rstest]
    fn rewind_restores_position() {
        let mut stream = TextStream::new("one\ntwo\nthree");
        stream.next_line();

        let checkpoint = stream.checkpoint();
        assert_eq!(Some("two"), stream.next_line().map(|l| l.text));
        assert_eq!(Some("three"), stream.next_line().map(|l| l.text));

        stream.rewind(checkpoint);
        assert_eq!(checkpoint, stream.checkpoint());
        assert_eq!(Some("two"), stream.peek_line().map(|l| l.text));
        assert_eq!(Some("two"), stream.next_line().map(|l| l.text));
    }
}
