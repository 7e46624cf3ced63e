// TypeScript-flavored text for data types. Never looks at runtime values.

use std::fmt;

use crate::ir::{DataType, ObjectType};

/// The textual form of a data type, e.g. `{ a: number; b?: Array<string> }`.
pub fn render(data_type: &DataType) -> String {
    data_type.to_string()
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Null => f.write_str("null"),
            DataType::Undefined => f.write_str("undefined"),
            DataType::String => f.write_str("string"),
            DataType::Number => f.write_str("number"),
            DataType::Boolean => f.write_str("boolean"),
            DataType::Literal { value } => write!(f, "{value}"),
            DataType::Array { inner } => write!(f, "Array<{inner}>"),
            DataType::Tuple { values } => {
                f.write_str("[")?;
                write_joined(f, values, ", ")?;
                f.write_str("]")
            }
            DataType::Map { inner } => write!(f, "{{ [key: string]: {inner} }}"),
            DataType::Object(object) => write!(f, "{object}"),
            DataType::Any => f.write_str("any"),
            DataType::Or { values } => write_joined(f, values, " | "),
            DataType::Reference(reference) => match reference.definition() {
                Some(body) => write!(f, "{body}"),
                None => f.write_str(reference.name()),
            },
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let required = self.required.iter().map(|(key, dt)| (key, "", dt));
        let optional = self.optional.iter().map(|(key, dt)| (key, "?", dt));
        f.write_str("{ ")?;
        for (i, (key, mark, dt)) in required.chain(optional).enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{key}{mark}: {dt}")?;
        }
        f.write_str(" }")
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[DataType], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
