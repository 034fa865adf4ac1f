use std::fmt;

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::take_until,
    character::complete::{char, one_of},
    combinator::{eof, map},
    multi::many0,
    sequence::delimited,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDescriptor(pub FieldType);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodDescriptor {
    pub parameters: Vec<FieldType>,
    pub return_type: ReturnType,
}

pub type ReturnType = Option<FieldType>;

#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub enum FieldType {
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Object(String),
    Short,
    Boolean,
    Array(Box<FieldType>),
}

impl FieldType {
    pub fn is_primitive(&self) -> bool {
        !matches!(self, FieldType::Object(_) | FieldType::Array(_))
    }

    pub fn to_descriptor(&self) -> String {
        match self {
            FieldType::Byte => "B".to_string(),
            FieldType::Char => "C".to_string(),
            FieldType::Double => "D".to_string(),
            FieldType::Float => "F".to_string(),
            FieldType::Int => "I".to_string(),
            FieldType::Long => "J".to_string(),
            FieldType::Short => "S".to_string(),
            FieldType::Boolean => "Z".to_string(),
            FieldType::Object(name) => format!("L{name};"),
            FieldType::Array(element) => format!("[{}", element.to_descriptor()),
        }
    }

    /// Number of leading array dimensions (0 for non-array types).
    pub fn dimensions(&self) -> usize {
        match self {
            FieldType::Array(element) => 1 + element.dimensions(),
            _ => 0,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_descriptor())
    }
}

pub fn parse_field_descriptor(input: &str) -> IResult<&str, FieldDescriptor> {
    let (input, field_type) = parse_field_type(input)?;
    eof(input)?;
    Ok((input, FieldDescriptor(field_type)))
}

pub fn parse_method_descriptor(input: &str) -> IResult<&str, MethodDescriptor> {
    let (input, parameters) =
        delimited(char('('), many0(parse_field_type), char(')')).parse(input)?;

    let (input, return_type) = parse_return_type_descriptor(input)?;

    eof(input)?;
    Ok((
        input,
        MethodDescriptor {
            parameters,
            return_type,
        },
    ))
}

pub fn parse_return_type_descriptor(input: &str) -> IResult<&str, ReturnType> {
    alt((map(parse_field_type, Some), parse_void_type)).parse(input)
}

fn parse_field_type(input: &str) -> IResult<&str, FieldType> {
    alt((parse_base_type, parse_object_type, parse_array_type)).parse(input)
}

fn parse_base_type(input: &str) -> IResult<&str, FieldType> {
    let (input, ch) = one_of("BCDFIJSZ").parse(input)?;
    let field_type = match ch {
        'B' => FieldType::Byte,
        'C' => FieldType::Char,
        'D' => FieldType::Double,
        'F' => FieldType::Float,
        'I' => FieldType::Int,
        'J' => FieldType::Long,
        'S' => FieldType::Short,
        'Z' => FieldType::Boolean,
        _ => unreachable!("one_of limits the character set"),
    };
    Ok((input, field_type))
}

fn parse_object_type(input: &str) -> IResult<&str, FieldType> {
    let (input, _) = char('L').parse(input)?;

    let (input, class_name) = take_until(";").parse(input)?;

    let (input, _) = char(';').parse(input)?;

    Ok((input, FieldType::Object(class_name.to_string())))
}

fn parse_array_type(input: &str) -> IResult<&str, FieldType> {
    let (input, _) = char('[').parse(input)?;

    let (input, field_type) = parse_field_type(input)?;

    Ok((input, FieldType::Array(Box::new(field_type))))
}

fn parse_void_type(input: &str) -> IResult<&str, Option<FieldType>> {
    let (input, _) = char('V').parse(input)?;
    Ok((input, None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_descriptor_round_trips() {
        for desc in ["I", "J", "Ljava/lang/String;", "[[D", "[Ljava/util/List;"] {
            let (_, FieldDescriptor(field_type)) = parse_field_descriptor(desc).unwrap();
            assert_eq!(field_type.to_descriptor(), desc);
        }
    }

    #[test]
    fn method_descriptor_parses_parameters_and_return() {
        let (_, descriptor) = parse_method_descriptor("(ILjava/lang/String;[J)V").unwrap();
        assert_eq!(
            descriptor.parameters,
            vec![
                FieldType::Int,
                FieldType::Object("java/lang/String".to_string()),
                FieldType::Array(Box::new(FieldType::Long)),
            ]
        );
        assert_eq!(descriptor.return_type, None);
    }

    #[test]
    fn array_dimensions() {
        let (_, FieldDescriptor(two_dim)) = parse_field_descriptor("[[I").unwrap();
        assert_eq!(two_dim.dimensions(), 2);
        assert!(FieldType::Int.is_primitive());
        assert!(!two_dim.is_primitive());
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert!(parse_field_descriptor("Ix").is_err());
        assert!(parse_method_descriptor("()Vx").is_err());
    }
}
