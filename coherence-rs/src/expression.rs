//! Gate parameter expressions.
//!
//! Only the subset of Quil expressions the coherence sequences need is modelled: real numbers,
//! the constant `pi`, and products and quotients of those.

use std::f64::consts::PI;
use std::hash::{Hash, Hasher};
use std::num::NonZeroI32;
use std::ops::{Div, Mul};

use lexical::{format, to_string_with_options, WriteFloatOptions};
use once_cell::sync::Lazy;

use crate::floating_point_eq;
use crate::quil::{Quil, ToQuilError, ToQuilResult};

/// The type of Quil expressions used as gate parameters.
///
/// Note that when comparing expressions, any embedded NaNs are treated as *equal* to other NaNs,
/// not unequal, in contravention of the IEEE 754 spec.
#[derive(Clone, Debug)]
pub enum Expression {
    Infix(InfixExpression),
    Number(f64),
    PiConstant,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InfixExpression {
    pub left: Box<Expression>,
    pub operator: InfixOperator,
    pub right: Box<Expression>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum InfixOperator {
    #[strum(serialize = "/")]
    Slash,
    #[strum(serialize = "*")]
    Star,
}

impl Expression {
    /// `pi/2`, the angle of a quarter turn.
    pub fn quarter_turn() -> Self {
        Expression::PiConstant / Expression::Number(2.0)
    }

    /// Evaluate the expression to a real number.
    ///
    /// ```
    /// use coherence_rs::expression::Expression;
    ///
    /// let angle = Expression::PiConstant * Expression::Number(2.0);
    /// assert_eq!(angle.to_real(), 2.0 * std::f64::consts::PI);
    /// ```
    pub fn to_real(&self) -> f64 {
        match self {
            Expression::Infix(InfixExpression {
                left,
                operator,
                right,
            }) => {
                let (left, right) = (left.to_real(), right.to_real());
                match operator {
                    InfixOperator::Slash => left / right,
                    InfixOperator::Star => left * right,
                }
            }
            Expression::Number(value) => *value,
            Expression::PiConstant => PI,
        }
    }

    /// Whether the expression contains no numbers Quil cannot spell (NaN or infinities).
    pub fn is_finite(&self) -> bool {
        match self {
            Expression::Infix(InfixExpression { left, right, .. }) => {
                left.is_finite() && right.is_finite()
            }
            Expression::Number(value) => value.is_finite(),
            Expression::PiConstant => true,
        }
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Expression::Infix(left), Expression::Infix(right)) => left == right,
            (Expression::Number(left), Expression::Number(right)) => {
                floating_point_eq::eq(*left, *right)
            }
            (Expression::PiConstant, Expression::PiConstant) => true,
            _ => false,
        }
    }
}

impl Eq for Expression {}

impl Hash for Expression {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Expression::Infix(infix) => infix.hash(state),
            Expression::Number(value) => floating_point_eq::hash(*value, state),
            Expression::PiConstant => {}
        }
    }
}

impl From<f64> for Expression {
    fn from(value: f64) -> Self {
        Expression::Number(value)
    }
}

macro_rules! impl_expr_op {
    ($name:ident, $function:ident, $operator:ident) => {
        impl $name for Expression {
            type Output = Self;
            fn $function(self, other: Self) -> Self {
                Self::Infix(InfixExpression {
                    left: Box::new(self),
                    operator: InfixOperator::$operator,
                    right: Box::new(other),
                })
            }
        }
    };
}

impl_expr_op!(Mul, mul, Star);
impl_expr_op!(Div, div, Slash);

static FORMAT_REAL_OPTIONS: Lazy<WriteFloatOptions> = Lazy::new(|| {
    WriteFloatOptions::builder()
        .negative_exponent_break(NonZeroI32::new(-5))
        .positive_exponent_break(NonZeroI32::new(15))
        .trim_floats(true)
        .build()
        .expect("options are valid")
});

/// Format a real number the way Quil spells it: `0` for zero and no trailing `.0` on integral
/// values.
#[inline(always)]
pub(crate) fn format_real(value: f64) -> String {
    const FORMAT: u128 = format::STANDARD;
    if value == 0f64 {
        "0".to_owned()
    } else {
        to_string_with_options::<_, FORMAT>(value, &FORMAT_REAL_OPTIONS)
    }
}

impl Quil for Expression {
    fn write(&self, f: &mut impl std::fmt::Write, fall_back_to_debug: bool) -> ToQuilResult<()> {
        match self {
            Expression::Infix(InfixExpression {
                left,
                operator,
                right,
            }) => {
                format_inner_expression(f, fall_back_to_debug, left)?;
                write!(f, "{operator}")?;
                format_inner_expression(f, fall_back_to_debug, right)
            }
            Expression::Number(value) if value.is_finite() => {
                write!(f, "{}", format_real(*value)).map_err(Into::into)
            }
            Expression::Number(value) => {
                if fall_back_to_debug {
                    write!(f, "{value:?}").map_err(Into::into)
                } else {
                    Err(ToQuilError::NonFiniteNumber(*value))
                }
            }
            Expression::PiConstant => write!(f, "pi").map_err(Into::into),
        }
    }
}

/// Format an expression nested inside another, parenthesizing compound subexpressions.
fn format_inner_expression(
    f: &mut impl std::fmt::Write,
    fall_back_to_debug: bool,
    expression: &Expression,
) -> ToQuilResult<()> {
    match expression {
        Expression::Infix(_) => {
            write!(f, "(")?;
            expression.write(f, fall_back_to_debug)?;
            write!(f, ")")?;
            Ok(())
        }
        _ => expression.write(f, fall_back_to_debug),
    }
}
