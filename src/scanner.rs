use {
    crate::{
        cursor::Cursor,
        error::ScanError,
        token::{SourcePosition, Token, TokenKind},
    },
    std::{
        io::{BufRead, BufReader, Read},
        iter::FusedIterator,
    },
    tracing::{debug, trace, warn},
    unicode_general_category::{get_general_category, GeneralCategory},
};

/// Character classes of the language, by Unicode general category.
trait CharClass {
    /// Decimal digit (Nd).
    fn is_decimal_digit(&self) -> bool;
    /// Letter (Lu, Ll, Lt, Lm, Lo). Letter-numbers such as `Ⅷ` are not letters.
    fn is_letter(&self) -> bool;
}

impl CharClass for char {
    fn is_decimal_digit(&self) -> bool {
        get_general_category(*self) == GeneralCategory::DecimalNumber
    }

    fn is_letter(&self) -> bool {
        matches!(
            get_general_category(*self),
            GeneralCategory::UppercaseLetter
                | GeneralCategory::LowercaseLetter
                | GeneralCategory::TitlecaseLetter
                | GeneralCategory::ModifierLetter
                | GeneralCategory::OtherLetter
        )
    }
}

/// How many letters an identifier token takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentifierScan {
    /// One letter per token: `abc` scans as `a`, `b`, `c`.
    #[default]
    SingleLetter,
    /// A maximal run of letters: `abc` scans as `abc`.
    Greedy,
}

impl IdentifierScan {
    fn limit(self) -> usize {
        match self {
            IdentifierScan::SingleLetter => 1,
            IdentifierScan::Greedy => usize::MAX,
        }
    }
}

/// Current scanner state for pulling tokens off a character stream.
pub struct Scanner<R> {
    cursor: Cursor<R>,
    position: SourcePosition,
    identifier_scan: IdentifierScan,
    in_string: bool,     // Re-reading the pushed-back quote starts the body scan
    pending_quote: bool, // A standalone quote has been emitted and not yet paired
}

impl<R: Read> Scanner<BufReader<R>> {
    pub fn from_read(reader: R) -> Self {
        Scanner::new(BufReader::new(reader))
    }
}

impl<R: BufRead> Scanner<R> {
    pub fn new(reader: R) -> Self {
        Self {
            cursor: Cursor::new(reader),
            position: SourcePosition::START,
            identifier_scan: IdentifierScan::default(),
            in_string: false,
            pending_quote: false,
        }
    }

    pub fn with_identifier_scan(mut self, identifier_scan: IdentifierScan) -> Self {
        self.identifier_scan = identifier_scan;
        self
    }

    pub fn position(&self) -> SourcePosition {
        self.position
    }

    /// Scan the next token.
    ///
    /// Once an `EndOfInput` token is returned, every later call returns the
    /// same `EndOfInput` token again. An `Err` means the input itself failed
    /// and scanning cannot continue.
    pub fn next_token(&mut self) -> Result<Token, ScanError> {
        let token = self.scan_token()?;
        trace!(
            position = %token.position,
            kind = %token.kind,
            literal = %token.literal,
            "token"
        );
        Ok(token)
    }

    /// Iterate over the tokens before `EndOfInput`.
    pub fn tokens(self) -> Tokens<R> {
        Tokens {
            scanner: self,
            done: false,
        }
    }

    pub fn collect_tokens(self) -> Result<Vec<Token>, ScanError> {
        self.tokens().collect()
    }

    fn scan_token(&mut self) -> Result<Token, ScanError> {
        loop {
            let Some(c) = self.advance()? else {
                return Ok(self.make_token(TokenKind::EndOfInput, ""));
            };

            if let Some(kind) = TokenKind::single_char(c) {
                return Ok(self.make_token(kind, c));
            }

            match c {
                '\n' => self.new_line(),
                '"' => {
                    if let Some(token) = self.quote()? {
                        return Ok(token);
                    }
                }
                c if c.is_whitespace() => {
                    // Ignore whitespace.
                }
                c if c.is_decimal_digit() => {
                    let start = self.position;
                    self.backup(c);
                    let literal = self.take_while(|c| c.is_decimal_digit(), usize::MAX)?;
                    return Ok(Token::new(start, TokenKind::Integer, literal));
                }
                c if c.is_letter() => {
                    let start = self.position;
                    self.backup(c);
                    let literal =
                        self.take_while(|c| c.is_letter(), self.identifier_scan.limit())?;
                    return Ok(Token::new(start, TokenKind::Identifier, literal));
                }
                c => return Ok(self.make_token(TokenKind::Illegal, c)),
            }
        }
    }

    /// Quote pairing.
    ///
    /// The first quote is emitted standalone and pushed back so that reading it
    /// again opens the string body. `None` means the body was empty and the
    /// quote is back on the cursor to be emitted standalone.
    fn quote(&mut self) -> Result<Option<Token>, ScanError> {
        if self.in_string {
            let start = self.position;
            return self.string(start);
        }

        let token = self.make_token(TokenKind::Quote, '"');
        if self.pending_quote {
            self.pending_quote = false;
        } else {
            self.pending_quote = true;
            self.in_string = true;
            self.backup('"');
        }
        Ok(Some(token))
    }

    fn string(&mut self, start: SourcePosition) -> Result<Option<Token>, ScanError> {
        debug!(%start, "string body opened");
        let mut literal = String::new();
        loop {
            let Some(c) = self.advance()? else {
                warn!(%start, "unterminated string dropped at end of input");
                self.in_string = false;
                self.pending_quote = false;
                return Ok(Some(self.make_token(TokenKind::EndOfInput, "")));
            };

            match c {
                // A quote right after the opening one does not close the string.
                '"' if literal.is_empty() => {
                    debug!(%start, "empty string body abandoned");
                    self.backup(c);
                    self.in_string = false;
                    return Ok(None);
                }
                '"' => {
                    debug!(%start, length = literal.chars().count(), "string body closed");
                    self.in_string = false;
                    self.pending_quote = false;
                    return Ok(Some(Token::new(start, TokenKind::StringLiteral, literal)));
                }
                '\n' => {
                    literal.push(c);
                    self.new_line();
                }
                c => literal.push(c),
            }
        }
    }

    /// Consume up to `limit` characters accepted by `accept`.
    /// The first rejected character is pushed back.
    fn take_while(
        &mut self,
        accept: impl Fn(char) -> bool,
        limit: usize,
    ) -> Result<String, ScanError> {
        let mut literal = String::new();
        let mut taken = 0;
        while taken < limit {
            let Some(c) = self.advance()? else {
                break;
            };
            if !accept(c) {
                self.backup(c);
                break;
            }
            literal.push(c);
            taken += 1;
        }
        Ok(literal)
    }

    fn advance(&mut self) -> Result<Option<char>, ScanError> {
        let c = self.cursor.read()?;
        if c.is_some() {
            self.position.column += 1;
        }
        Ok(c)
    }

    fn backup(&mut self, c: char) {
        self.cursor.unread(c);
        self.position.column = self.position.column.saturating_sub(1);
    }

    fn new_line(&mut self) {
        self.position.line += 1;
        self.position.column = 0;
    }

    fn make_token(&self, kind: TokenKind, literal: impl Into<String>) -> Token {
        Token::new(self.position, kind, literal)
    }
}

/// Tokens of a scanner up to, but not including, `EndOfInput`.
///
/// Stops after the first read error.
pub struct Tokens<R> {
    scanner: Scanner<R>,
    done: bool,
}

impl<R: BufRead> Iterator for Tokens<R> {
    type Item = Result<Token, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.scanner.next_token() {
            Ok(token) if token.is_eof() => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
            token => Some(token),
        }
    }
}

impl<R: BufRead> FusedIterator for Tokens<R> {}
