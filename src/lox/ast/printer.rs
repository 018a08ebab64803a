use super::{Binary, Expr, ExprVisitor, Grouping, Literal, Unary};

/// Renders an expression tree in fully parenthesized prefix form, e.g.
/// `(* (- 123) (group 45.67))`.
pub struct Printer;

impl Printer {
    pub fn print(&mut self, expr: &Expr) -> String {
        expr.accept(self)
    }

    fn parenthesize(&mut self, name: &str, expressions: &[&Expr]) -> String {
        let mut s = format!("({}", name);
        for expr in expressions {
            s.push(' ');
            s.push_str(&self.print(expr));
        }
        s + ")"
    }
}

impl ExprVisitor<String> for Printer {
    fn visit_binary(&mut self, binary: &Binary) -> String {
        self.parenthesize(
            binary.operator().token().lexeme(),
            &[binary.left(), binary.right()],
        )
    }

    fn visit_grouping(&mut self, grouping: &Grouping) -> String {
        self.parenthesize("group", &[grouping.inner()])
    }

    fn visit_literal(&mut self, literal: &Literal) -> String {
        // Value::Nil displays as "nil"
        literal.value().to_string()
    }

    fn visit_unary(&mut self, unary: &Unary) -> String {
        self.parenthesize(unary.operator().token().lexeme(), &[unary.right()])
    }
}
