//! Forward-only cursor over the host argument vector.

/// Hands out tokens left to right; nothing is ever revisited.
#[derive(Debug)]
pub(crate) struct ArgCursor<'a> {
    args: &'a [String],
    pos: usize,
}

impl<'a> ArgCursor<'a> {
    pub(crate) fn new(args: &'a [String]) -> Self {
        Self { args, pos: 0 }
    }

    /// Take the next token, switch or value alike.
    pub(crate) fn next(&mut self) -> Option<&'a str> {
        let token = self.args.get(self.pos)?;
        self.pos += 1;
        Some(token.as_str())
    }

    /// Take every token that has not been consumed yet.
    pub(crate) fn rest(&mut self) -> &'a [String] {
        let tail = &self.args[self.pos..];
        self.pos = self.args.len();
        tail
    }

    pub(crate) fn remaining(&self) -> usize {
        self.args.len() - self.pos
    }

    pub(crate) fn consumed(&self) -> usize {
        self.pos
    }
}
