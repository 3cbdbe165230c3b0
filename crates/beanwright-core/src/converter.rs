//! Value coercion to constructor parameter types.
//!
//! Conversion is where most candidate rejections come from: a literal `"abc"`
//! cannot become an `int`, so the candidate taking an `int` there is skipped.
//! Converters must therefore fail rather than truncate or default.

use anyhow::{anyhow, bail, Context, Result};
use beanwright_types::env_utils::parse_flag;
use beanwright_types::{ParamType, Value};

/// Coerces a resolved value into the exact type a parameter requires.
pub trait TypeConverter {
    fn convert(&self, value: Value, target: &ParamType) -> Result<Value>;
}

impl<C: TypeConverter + ?Sized> TypeConverter for &C {
    fn convert(&self, value: Value, target: &ParamType) -> Result<Value> {
        (**self).convert(value, target)
    }
}

/// Lossless conversions between literals, primitives and registered objects.
///
/// | target   | accepted sources                                          |
/// |----------|-----------------------------------------------------------|
/// | `bool`   | bool, string (`true/false/yes/no/on/off/1/0`)             |
/// | `int`    | int, long within range, string                            |
/// | `long`   | long, int, string                                         |
/// | `double` | double, int, long exactly representable, string           |
/// | `string` | string, bool, int, long, double                           |
/// | `any`    | everything, unchanged                                     |
/// | object   | objects whose type name equals the parameter's type name  |
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleTypeConverter;

/// Largest magnitude an f64 holds without losing integer precision.
const F64_EXACT_INT: u64 = 1 << 53;

impl TypeConverter for SimpleTypeConverter {
    fn convert(&self, value: Value, target: &ParamType) -> Result<Value> {
        match (target, value) {
            (ParamType::Any, value) => Ok(value),

            (ParamType::Bool, Value::Bool(b)) => Ok(Value::Bool(b)),
            (ParamType::Bool, Value::Str(s)) => parse_flag(&s)
                .map(Value::Bool)
                .ok_or_else(|| anyhow!("cannot convert string {:?} to bool", s)),

            (ParamType::Int, Value::Int(n)) => Ok(Value::Int(n)),
            (ParamType::Int, Value::Long(n)) => i32::try_from(n)
                .map(Value::Int)
                .map_err(|_| anyhow!("long {} does not fit in int", n)),
            (ParamType::Int, Value::Str(s)) => s
                .trim()
                .parse::<i32>()
                .map(Value::Int)
                .with_context(|| format!("cannot convert string {:?} to int", s)),

            (ParamType::Long, Value::Long(n)) => Ok(Value::Long(n)),
            (ParamType::Long, Value::Int(n)) => Ok(Value::Long(i64::from(n))),
            (ParamType::Long, Value::Str(s)) => s
                .trim()
                .parse::<i64>()
                .map(Value::Long)
                .with_context(|| format!("cannot convert string {:?} to long", s)),

            (ParamType::Double, Value::Double(d)) => Ok(Value::Double(d)),
            (ParamType::Double, Value::Int(n)) => Ok(Value::Double(f64::from(n))),
            (ParamType::Double, Value::Long(n)) => {
                if n.unsigned_abs() > F64_EXACT_INT {
                    bail!("long {} is not exactly representable as double", n);
                }
                Ok(Value::Double(n as f64))
            }
            (ParamType::Double, Value::Str(s)) => {
                let text = s.trim();
                let d = text
                    .parse::<f64>()
                    .with_context(|| format!("cannot convert string {:?} to double", s))?;
                if d.is_infinite() && !spells_infinity(text) {
                    bail!("string {:?} overflows double", s);
                }
                Ok(Value::Double(d))
            }

            (ParamType::String, Value::Str(s)) => Ok(Value::Str(s)),
            (ParamType::String, Value::Bool(b)) => Ok(Value::Str(b.to_string())),
            (ParamType::String, Value::Int(n)) => Ok(Value::Str(n.to_string())),
            (ParamType::String, Value::Long(n)) => Ok(Value::Str(n.to_string())),
            (ParamType::String, Value::Double(d)) => Ok(Value::Str(d.to_string())),

            (ParamType::Object(expected), Value::Object(instance)) => {
                if instance.type_name() == expected {
                    Ok(Value::Object(instance))
                } else {
                    bail!(
                        "object of type {} is not assignable to {}",
                        instance.type_name(),
                        expected
                    )
                }
            }

            (target, value) => bail!("cannot convert {} to {}", value.describe(), target),
        }
    }
}

/// `inf` or `infinity`, optionally signed, in any case.
fn spells_infinity(text: &str) -> bool {
    let unsigned = text.trim_start_matches(['+', '-']);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}
