/// Anything in a coherence sequence that has a Quil spelling.
pub trait Quil {
    /// Render as Quil text, failing on values Quil cannot express (e.g. a NaN angle).
    fn to_quil(&self) -> Result<String, ToQuilError> {
        let mut buffer = String::new();
        self.write(&mut buffer, false)?;
        Ok(buffer)
    }

    /// Render as Quil text for logs and messages; unrepresentable parts show up in debug form.
    fn to_quil_or_debug(&self) -> String
    where
        Self: std::fmt::Debug,
    {
        let mut buffer = String::new();
        self.write(&mut buffer, true).ok();
        buffer
    }

    fn write(
        &self,
        writer: &mut impl std::fmt::Write,
        fall_back_to_debug: bool,
    ) -> Result<(), ToQuilError>;
}

pub type ToQuilResult<T> = Result<T, ToQuilError>;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ToQuilError {
    #[error("could not write Quil: {0}")]
    FormatError(#[from] std::fmt::Error),
    #[error("{0} cannot be written as a Quil number")]
    NonFiniteNumber(f64),
}

/// Writes each item behind `prefix`, with `joiner` between items. Nothing is written for an
/// empty list.
pub(crate) fn write_join_quil<'i, I, T>(
    writer: &mut impl std::fmt::Write,
    fall_back_to_debug: bool,
    values: I,
    joiner: &str,
    prefix: &str,
) -> Result<(), ToQuilError>
where
    I: IntoIterator<Item = &'i T>,
    T: Quil + 'i,
{
    for (position, value) in values.into_iter().enumerate() {
        if position > 0 {
            writer.write_str(joiner)?;
        }
        writer.write_str(prefix)?;
        value.write(writer, fall_back_to_debug)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{write_join_quil, Quil};
    use crate::expression::Expression;

    #[test]
    fn joins_with_prefix_and_separator() {
        let values = [Expression::Number(1.0), Expression::PiConstant];
        let mut buffer = String::new();
        write_join_quil(&mut buffer, false, &values, ", ", "%").unwrap();
        assert_eq!(buffer, "%1, %pi");

        let mut empty = String::new();
        write_join_quil::<_, Expression>(&mut empty, false, &[], ", ", "%").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn debug_fallback_never_fails() {
        let nan = Expression::Number(f64::NAN);
        assert!(nan.to_quil().is_err());
        assert!(!nan.to_quil_or_debug().is_empty());
    }
}
