//! Built-in scalar functions.

use crate::access::Value;
use crate::expression::{EvalResult, ExpressionError};

/// Names of every built-in function, sorted
pub const FUNCTION_NAMES: &[&str] = &[
    "abs", "coalesce", "concat", "length", "lower", "round", "substring", "trim", "upper",
];

/// Call a built-in function by name with already evaluated arguments
pub fn call_function(name: &str, args: Vec<Value>) -> EvalResult<Value> {
    match name {
        "abs" => {
            let [arg] = fixed_args(name, args)?;
            match arg {
                Value::Null => Ok(Value::Null),
                Value::Int64(n) => n.checked_abs().map(Value::Int64).ok_or_else(|| {
                    ExpressionError::Overflow {
                        operator: name.to_string(),
                    }
                }),
                Value::Double(d) => Ok(Value::Double(d.abs())),
                other => Err(wrong_type(name, "a number", &other)),
            }
        }
        "round" => {
            let [arg] = fixed_args(name, args)?;
            match arg {
                Value::Null => Ok(Value::Null),
                Value::Int64(n) => Ok(Value::Int64(n)),
                Value::Double(d) => Ok(Value::Double(d.round())),
                other => Err(wrong_type(name, "a number", &other)),
            }
        }
        "upper" => map_string(name, args, |s| s.to_uppercase()),
        "lower" => map_string(name, args, |s| s.to_lowercase()),
        "trim" => map_string(name, args, |s| s.trim().to_string()),
        "length" => {
            let [arg] = fixed_args(name, args)?;
            match arg {
                Value::Null => Ok(Value::Null),
                Value::String(s) => Ok(Value::Int64(s.chars().count() as i64)),
                other => Err(wrong_type(name, "a string", &other)),
            }
        }
        "substring" => substring(args),
        "concat" => {
            if args.iter().any(Value::is_null) {
                return Ok(Value::Null);
            }
            Ok(Value::String(
                args.iter().map(Value::to_display_string).collect(),
            ))
        }
        "coalesce" => Ok(args
            .into_iter()
            .find(|v| !v.is_null())
            .unwrap_or(Value::Null)),
        _ => Err(ExpressionError::UnknownFunction {
            name: name.to_string(),
        }),
    }
}

fn fixed_args<const N: usize>(name: &str, args: Vec<Value>) -> EvalResult<[Value; N]> {
    let actual = args.len();
    <[Value; N]>::try_from(args).map_err(|_| ExpressionError::FunctionArgumentCount {
        function: name.to_string(),
        expected: N.to_string(),
        actual,
    })
}

fn map_string(name: &str, args: Vec<Value>, f: impl FnOnce(&str) -> String) -> EvalResult<Value> {
    let [arg] = fixed_args(name, args)?;
    match arg {
        Value::Null => Ok(Value::Null),
        Value::String(s) => Ok(Value::String(f(&s))),
        other => Err(wrong_type(name, "a string", &other)),
    }
}

/// `substring(s, start[, len])`, 0-based over characters
fn substring(args: Vec<Value>) -> EvalResult<Value> {
    const NAME: &str = "substring";
    if !(2..=3).contains(&args.len()) {
        return Err(ExpressionError::FunctionArgumentCount {
            function: NAME.to_string(),
            expected: "2 or 3".to_string(),
            actual: args.len(),
        });
    }
    if args.iter().any(Value::is_null) {
        return Ok(Value::Null);
    }

    let s = match &args[0] {
        Value::String(s) => s,
        other => return Err(wrong_type(NAME, "a string", other)),
    };
    let start = index_arg(&args[1])?;
    let len = match args.get(2) {
        Some(v) => Some(index_arg(v)?),
        None => None,
    };

    let chars = s.chars().skip(start);
    let result: String = match len {
        Some(len) => chars.take(len).collect(),
        None => chars.collect(),
    };
    Ok(Value::String(result))
}

fn index_arg(value: &Value) -> EvalResult<usize> {
    match value {
        Value::Int64(n) => usize::try_from(*n).map_err(|_| ExpressionError::InvalidArgument {
            function: "substring".to_string(),
            message: format!("negative index {}", n),
        }),
        other => Err(wrong_type("substring", "an integer", other)),
    }
}

fn wrong_type(function: &str, expected: &str, actual: &Value) -> ExpressionError {
    let actual = actual.data_type().map(|t| t.as_str()).unwrap_or("null");
    ExpressionError::InvalidArgument {
        function: function.to_string(),
        message: format!("expected {}, got {}", expected, actual),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Value {
        Value::from(v)
    }

    #[test]
    fn test_numeric_functions() {
        assert_eq!(call_function("abs", vec![Value::Int64(-3)]).unwrap(), Value::Int64(3));
        assert_eq!(
            call_function("abs", vec![Value::Double(-1.5)]).unwrap(),
            Value::Double(1.5)
        );
        assert!(matches!(
            call_function("abs", vec![Value::Int64(i64::MIN)]),
            Err(ExpressionError::Overflow { .. })
        ));
        assert_eq!(
            call_function("round", vec![Value::Double(2.5)]).unwrap(),
            Value::Double(3.0)
        );
        assert_eq!(call_function("round", vec![Value::Null]).unwrap(), Value::Null);
    }

    #[test]
    fn test_string_functions() {
        assert_eq!(call_function("upper", vec![s("abc")]).unwrap(), s("ABC"));
        assert_eq!(call_function("lower", vec![s("ÀB")]).unwrap(), s("àb"));
        assert_eq!(call_function("trim", vec![s("  x ")]).unwrap(), s("x"));
        assert_eq!(call_function("length", vec![s("héllo")]).unwrap(), Value::Int64(5));
        assert!(matches!(
            call_function("upper", vec![Value::Int64(1)]),
            Err(ExpressionError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_substring() {
        assert_eq!(
            call_function("substring", vec![s("database"), Value::Int64(4)]).unwrap(),
            s("base")
        );
        assert_eq!(
            call_function("substring", vec![s("database"), Value::Int64(0), Value::Int64(4)])
                .unwrap(),
            s("data")
        );
        assert_eq!(
            call_function("substring", vec![s("abc"), Value::Int64(10)]).unwrap(),
            s("")
        );
        assert!(matches!(
            call_function("substring", vec![s("abc"), Value::Int64(-1)]),
            Err(ExpressionError::InvalidArgument { .. })
        ));
        assert!(matches!(
            call_function("substring", vec![s("abc")]),
            Err(ExpressionError::FunctionArgumentCount { actual: 1, .. })
        ));
    }

    #[test]
    fn test_variadic_functions() {
        assert_eq!(
            call_function("concat", vec![s("a"), Value::Int64(1), Value::Boolean(true)]).unwrap(),
            s("a1true")
        );
        assert_eq!(call_function("concat", vec![s("a"), Value::Null]).unwrap(), Value::Null);
        assert_eq!(
            call_function("coalesce", vec![Value::Null, Value::Int64(2), Value::Int64(3)])
                .unwrap(),
            Value::Int64(2)
        );
        assert_eq!(call_function("coalesce", vec![]).unwrap(), Value::Null);
    }

    #[test]
    fn test_arity_and_unknown() {
        assert!(matches!(
            call_function("abs", vec![]),
            Err(ExpressionError::FunctionArgumentCount {
                actual: 0,
                ..
            })
        ));
        assert!(matches!(
            call_function("sqrt", vec![Value::Int64(4)]),
            Err(ExpressionError::UnknownFunction { .. })
        ));
        assert!(FUNCTION_NAMES.windows(2).all(|w| w[0] < w[1]));
    }
}
