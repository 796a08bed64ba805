/// SQL keywords, operators and punctuation understood by the chunk renderer.
#[allow(non_camel_case_types, clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    // Statement keywords
    SELECT,
    DISTINCT,
    FROM,
    WHERE,
    GROUP,
    ORDER,
    BY,
    ASC,
    DESC,
    LIMIT,
    OFFSET,
    AS,

    // Joins
    INNER,
    LEFT,
    JOIN,
    ON,

    // Window functions
    OVER,
    PARTITION,

    // Predicates
    AND,
    OR,
    NOT,
    EXISTS,
    IN,
    IS,
    NULL,
    LIKE,
    ILIKE,

    // Punctuation
    LPAREN,
    RPAREN,
    COMMA,
    SEMI,
    DOT,
    STAR,

    // Comparison operators
    EQ,
    NE,
    LT,
    GT,
    LE,
    GE,
}

impl Token {
    /// Returns the rendered text of this token.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Token::SELECT => "SELECT",
            Token::DISTINCT => "DISTINCT",
            Token::FROM => "FROM",
            Token::WHERE => "WHERE",
            Token::GROUP => "GROUP",
            Token::ORDER => "ORDER",
            Token::BY => "BY",
            Token::ASC => "ASC",
            Token::DESC => "DESC",
            Token::LIMIT => "LIMIT",
            Token::OFFSET => "OFFSET",
            Token::AS => "AS",
            Token::INNER => "INNER",
            Token::LEFT => "LEFT",
            Token::JOIN => "JOIN",
            Token::ON => "ON",
            Token::OVER => "OVER",
            Token::PARTITION => "PARTITION",
            Token::AND => "AND",
            Token::OR => "OR",
            Token::NOT => "NOT",
            Token::EXISTS => "EXISTS",
            Token::IN => "IN",
            Token::IS => "IS",
            Token::NULL => "NULL",
            Token::LIKE => "LIKE",
            Token::ILIKE => "ILIKE",
            Token::LPAREN => "(",
            Token::RPAREN => ")",
            Token::COMMA => ",",
            Token::SEMI => ";",
            Token::DOT => ".",
            Token::STAR => "*",
            Token::EQ => "=",
            Token::NE => "!=",
            Token::LT => "<",
            Token::GT => ">",
            Token::LE => "<=",
            Token::GE => ">=",
        }
    }

    /// Comparison operators are always surrounded by spaces.
    pub const fn is_operator(&self) -> bool {
        matches!(
            self,
            Token::EQ | Token::NE | Token::LT | Token::GT | Token::LE | Token::GE
        )
    }

    /// Punctuation never takes part in word spacing.
    pub const fn is_punctuation(&self) -> bool {
        matches!(
            self,
            Token::LPAREN | Token::RPAREN | Token::COMMA | Token::SEMI | Token::DOT
        )
    }
}

impl core::fmt::Display for Token {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
