use thiserror::Error;

use super::scanner::tokens::{Token, TokenType, Value};

pub mod printer;

#[derive(Error, Debug, PartialEq)]
pub enum AstError {
    #[error("{lexeme} ({token_type:?}) on line {line} is not a {expected} operator")]
    InvalidOperator {
        token_type: TokenType,
        lexeme: String,
        line: usize,
        expected: &'static str,
    },
}

impl AstError {
    fn invalid_operator(token: &Token, expected: &'static str) -> Self {
        AstError::InvalidOperator {
            token_type: token.token_type(),
            lexeme: token.lexeme().to_owned(),
            line: token.line(),
            expected,
        }
    }
}

/// A token known to be one of `!= == > >= < <= - + / *`. Borrowed from the token sequence
/// that owns it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryOperator<'t>(&'t Token);

impl<'t> BinaryOperator<'t> {
    pub fn token(&self) -> &'t Token {
        self.0
    }
}

impl<'t> TryFrom<&'t Token> for BinaryOperator<'t> {
    type Error = AstError;

    fn try_from(token: &'t Token) -> Result<Self, Self::Error> {
        if !token.token_type().is_binary_operator() {
            return Err(AstError::invalid_operator(token, "binary"));
        }
        Ok(BinaryOperator(token))
    }
}

/// A token known to be `!` or `-`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnaryOperator<'t>(&'t Token);

impl<'t> UnaryOperator<'t> {
    pub fn token(&self) -> &'t Token {
        self.0
    }
}

impl<'t> TryFrom<&'t Token> for UnaryOperator<'t> {
    type Error = AstError;

    fn try_from(token: &'t Token) -> Result<Self, Self::Error> {
        if !token.token_type().is_unary_operator() {
            return Err(AstError::invalid_operator(token, "unary"));
        }
        Ok(UnaryOperator(token))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr<'t> {
    Binary(Binary<'t>),
    Grouping(Grouping<'t>),
    Literal(Literal),
    Unary(Unary<'t>),
}

impl<'t> Expr<'t> {
    /// Dispatch to the visitor method matching this node's variant.
    pub fn accept<T, V: ExprVisitor<T> + ?Sized>(&self, visitor: &mut V) -> T {
        match self {
            Expr::Binary(binary) => visitor.visit_binary(binary),
            Expr::Grouping(grouping) => visitor.visit_grouping(grouping),
            Expr::Literal(literal) => visitor.visit_literal(literal),
            Expr::Unary(unary) => visitor.visit_unary(unary),
        }
    }

    pub fn binary(left: Expr<'t>, operator: BinaryOperator<'t>, right: Expr<'t>) -> Self {
        Expr::Binary(Binary::new(operator, Box::new(left), Box::new(right)))
    }

    pub fn grouping(inner: Expr<'t>) -> Self {
        Expr::Grouping(Grouping(Box::new(inner)))
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        Expr::Literal(Literal(value.into()))
    }

    pub fn nil() -> Self {
        Expr::Literal(Literal(Value::Nil))
    }

    pub fn unary(operator: UnaryOperator<'t>, right: Expr<'t>) -> Self {
        Expr::Unary(Unary::new(operator, Box::new(right)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binary<'t> {
    operator: BinaryOperator<'t>,
    left: Box<Expr<'t>>,
    right: Box<Expr<'t>>,
}

impl<'t> Binary<'t> {
    pub fn new(operator: BinaryOperator<'t>, left: Box<Expr<'t>>, right: Box<Expr<'t>>) -> Self {
        Binary {
            operator,
            left,
            right,
        }
    }

    pub fn operator(&self) -> BinaryOperator<'t> {
        self.operator
    }

    pub fn left(&self) -> &Expr<'t> {
        &self.left
    }

    pub fn right(&self) -> &Expr<'t> {
        &self.right
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Unary<'t> {
    operator: UnaryOperator<'t>,
    right: Box<Expr<'t>>,
}

impl<'t> Unary<'t> {
    pub fn new(operator: UnaryOperator<'t>, right: Box<Expr<'t>>) -> Self {
        Self { operator, right }
    }

    pub fn operator(&self) -> UnaryOperator<'t> {
        self.operator
    }

    pub fn right(&self) -> &Expr<'t> {
        &self.right
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grouping<'t>(Box<Expr<'t>>);

impl<'t> Grouping<'t> {
    pub fn new(inner: Box<Expr<'t>>) -> Self {
        Grouping(inner)
    }

    pub fn inner(&self) -> &Expr<'t> {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Literal(Value);

impl Literal {
    pub fn new(value: Value) -> Self {
        Literal(value)
    }

    pub fn value(&self) -> &Value {
        &self.0
    }
}

pub trait ExprVisitor<T> {
    fn visit_binary(&mut self, binary: &Binary) -> T;
    fn visit_grouping(&mut self, grouping: &Grouping) -> T;
    fn visit_literal(&mut self, literal: &Literal) -> T;
    fn visit_unary(&mut self, unary: &Unary) -> T;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Records which visitor method ran and counts nodes, to check dispatch.
    #[derive(Default)]
    struct Tally {
        visited: Vec<&'static str>,
    }

    impl ExprVisitor<usize> for Tally {
        fn visit_binary(&mut self, binary: &Binary) -> usize {
            self.visited.push("binary");
            let left: usize = binary.left().accept(self);
            let right: usize = binary.right().accept(self);
            1 + left + right
        }

        fn visit_grouping(&mut self, grouping: &Grouping) -> usize {
            self.visited.push("grouping");
            let inner: usize = grouping.inner().accept(self);
            1 + inner
        }

        fn visit_literal(&mut self, _literal: &Literal) -> usize {
            self.visited.push("literal");
            1
        }

        fn visit_unary(&mut self, unary: &Unary) -> usize {
            self.visited.push("unary");
            let right: usize = unary.right().accept(self);
            1 + right
        }
    }

    fn token(token_type: TokenType, lexeme: &str) -> Token {
        Token::new(token_type, lexeme.to_owned(), None, 1)
    }

    #[test]
    fn test_accept_dispatches_once_per_node() {
        let mut tally = Tally::default();
        let count: usize = Expr::nil().accept(&mut tally);
        assert_eq!(count, 1);
        assert_eq!(tally.visited, vec!["literal"]);

        let plus = token(TokenType::Plus, "+");
        let bang = token(TokenType::Bang, "!");
        let expr = Expr::binary(
            Expr::unary(UnaryOperator::try_from(&bang).unwrap(), Expr::literal(true)),
            BinaryOperator::try_from(&plus).unwrap(),
            Expr::grouping(Expr::literal(2.)),
        );
        let mut tally = Tally::default();
        let count: usize = expr.accept(&mut tally);
        assert_eq!(count, 5);
        assert_eq!(
            tally.visited,
            vec!["binary", "unary", "literal", "grouping", "literal"]
        );
    }

    #[test]
    fn test_operator_narrowing() {
        let star = token(TokenType::Star, "*");
        let minus = token(TokenType::Minus, "-");
        let equal = token(TokenType::Equal, "=");

        assert!(BinaryOperator::try_from(&star).is_ok());
        assert!(BinaryOperator::try_from(&minus).is_ok());
        assert!(UnaryOperator::try_from(&minus).is_ok());
        assert_eq!(
            UnaryOperator::try_from(&star).map(|op| op.token().lexeme().to_owned()),
            Err(AstError::InvalidOperator {
                token_type: TokenType::Star,
                lexeme: "*".to_owned(),
                line: 1,
                expected: "unary",
            })
        );

        let err = BinaryOperator::try_from(&equal).unwrap_err();
        assert_eq!(err.to_string(), "= (Equal) on line 1 is not a binary operator");
    }

    #[test]
    fn test_node_accessors() {
        let slash = token(TokenType::Slash, "/");
        let minus = token(TokenType::Minus, "-");
        let expr = Expr::binary(
            Expr::literal(1.),
            BinaryOperator::try_from(&slash).unwrap(),
            Expr::unary(
                UnaryOperator::try_from(&minus).unwrap(),
                Expr::grouping(Expr::nil()),
            ),
        );

        let Expr::Binary(binary) = &expr else {
            panic!("expected a binary node, got {expr:?}");
        };
        assert_eq!(binary.operator().token().lexeme(), "/");
        assert_eq!(binary.left(), &Expr::literal(1.));

        let Expr::Unary(unary) = binary.right() else {
            panic!("expected a unary node, got {:?}", binary.right());
        };
        assert_eq!(unary.operator().token().token_type(), TokenType::Minus);

        let Expr::Grouping(grouping) = unary.right() else {
            panic!("expected a grouping node, got {:?}", unary.right());
        };
        let Expr::Literal(literal) = grouping.inner() else {
            panic!("expected a literal node, got {:?}", grouping.inner());
        };
        assert_eq!(literal.value(), &Value::Nil);
    }

    #[test]
    fn test_operator_borrows_token() {
        let star = token(TokenType::Star, "*");
        let op = BinaryOperator::try_from(&star).unwrap();
        assert!(std::ptr::eq(op.token(), &star));
    }
}
