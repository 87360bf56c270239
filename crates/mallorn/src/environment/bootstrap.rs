//! One-time bootstrap: builtin registration and the default namespace

use std::sync::Arc;

use super::{EnvironmentRef, CORE_NS, DEFAULT_NS, NS_MARKER, NS_SYMBOL};
use crate::error::EnvironmentError;
use crate::value::{BuiltinFn, SpecialForm, TypeDesc, Value};

/// Run the full bootstrap sequence against a freshly constructed
/// environment.
///
/// Registration happens with write-scope enforcement off so the builtin
/// table can land in the reserved core namespace; enforcement is turned on
/// before the switch to the default working namespace, after which core is
/// exactly as protected as any other namespace. The namespace-switch
/// primitive goes in last, bound in the working namespace itself.
pub(super) fn run(env: &EnvironmentRef) -> Result<(), EnvironmentError> {
    for (symbol, value) in builtin_table() {
        env.bind(&symbol, value)
            .map_err(|err| bootstrap_error(&symbol, err))?;
    }

    env.enable_scope_check();

    env.switch_namespace(DEFAULT_NS)
        .map_err(|err| bootstrap_error(NS_MARKER, err))?;

    env.bind(NS_SYMBOL, ns_primitive(env))
        .map_err(|err| bootstrap_error(NS_SYMBOL, err))?;

    Ok(())
}

fn bootstrap_error(symbol: &str, source: EnvironmentError) -> EnvironmentError {
    EnvironmentError::Bootstrap {
        symbol: symbol.to_string(),
        source: Box::new(source),
    }
}

/// Every name preloaded into the reserved namespaces, with its value.
fn builtin_table() -> Vec<(String, Value)> {
    const SPECIAL_FORMS: [SpecialForm; 8] = [
        SpecialForm::Do,
        SpecialForm::Def,
        SpecialForm::If,
        SpecialForm::Fn,
        SpecialForm::Macro,
        SpecialForm::Let,
        SpecialForm::Quote,
        SpecialForm::SyntaxQuote,
    ];

    let mut table: Vec<(String, Value)> = SPECIAL_FORMS
        .iter()
        .map(|form| (format!("{CORE_NS}/{}", form.name()), Value::SpecialForm(*form)))
        .collect();

    // Threading
    table.push(builtin("->", -1, builtin_thread_first));
    table.push(builtin("->>", -1, builtin_thread_last));

    // Type introspection
    table.push(builtin("type", 1, builtin_type));
    table.push(builtin("to-type", 2, builtin_to_type));
    table.push(builtin("impl?", 2, builtin_impl));
    table.push(builtin("realize", 1, builtin_realize));
    table.push(builtin("throw", -1, builtin_throw));

    // Strings
    table.push(builtin("str", -1, builtin_str));

    // Math
    table.push(builtin("+", -1, builtin_add));
    table.push(builtin("-", -1, builtin_sub));
    table.push(builtin("*", -1, builtin_mul));
    table.push(builtin("/", -1, builtin_div));
    table.push(builtin("=", 2, builtin_eq));
    table.push(builtin(">", 2, |args: &[Value]| {
        compare(">", args, |a, b| a > b)
    }));
    table.push(builtin(">=", 2, |args: &[Value]| {
        compare(">=", args, |a, b| a >= b)
    }));
    table.push(builtin("<", 2, |args: &[Value]| {
        compare("<", args, |a, b| a < b)
    }));
    table.push(builtin("<=", 2, |args: &[Value]| {
        compare("<=", args, |a, b| a <= b)
    }));

    // IO
    table.push(builtin("println", -1, builtin_println));
    table.push(builtin("printf", -1, builtin_printf));

    // Abstract type descriptors
    table.push(("types/Seq".to_string(), Value::Type(TypeDesc::Seq)));
    table.push(("types/Invokable".to_string(), Value::Type(TypeDesc::Invokable)));

    table
}

fn builtin(
    name: &str,
    arity: i32,
    func: impl Fn(&[Value]) -> Result<Value, String> + Send + Sync + 'static,
) -> (String, Value) {
    (
        format!("{CORE_NS}/{name}"),
        Value::Builtin(BuiltinFn::new(name, arity, func)),
    )
}

/// The namespace-switch primitive.
///
/// Holds a weak handle back to its own environment; the environment in
/// turn owns the builtin, and the weak side breaks the cycle.
fn ns_primitive(env: &EnvironmentRef) -> Value {
    let handle = Arc::downgrade(env);
    Value::Builtin(BuiltinFn::new(NS_SYMBOL, 1, move |args: &[Value]| {
        let env = handle
            .upgrade()
            .ok_or_else(|| "environment is gone".to_string())?;
        match args {
            [Value::Symbol(name)] | [Value::String(name)] => {
                env.switch_namespace(name).map_err(|err| err.to_string())?;
                Ok(Value::Nil)
            }
            _ => Err("ns expects a namespace symbol".to_string()),
        }
    }))
}

// ═══════════════════════════════════════════════════════════════════════
// Builtin Function Implementations
// ═══════════════════════════════════════════════════════════════════════

fn builtin_thread_first(args: &[Value]) -> Result<Value, String> {
    thread("->", args, |form, threaded| {
        let mut items = Vec::with_capacity(form.len() + 1);
        items.push(form[0].clone());
        items.push(threaded);
        items.extend_from_slice(&form[1..]);
        items
    })
}

fn builtin_thread_last(args: &[Value]) -> Result<Value, String> {
    thread("->>", args, |form, threaded| {
        let mut items = form.to_vec();
        items.push(threaded);
        items
    })
}

/// Structural form threading shared by `->` and `->>`.
///
/// Threads the first argument through each following form, wrapping bare
/// values into single-element calls. Produces the rewritten form as data;
/// evaluating it is the evaluator's job.
fn thread(
    op: &str,
    args: &[Value],
    splice: fn(&[Value], Value) -> Vec<Value>,
) -> Result<Value, String> {
    let (first, forms) = args
        .split_first()
        .ok_or_else(|| format!("{op} expects at least one argument"))?;

    let mut threaded = first.clone();
    for form in forms {
        threaded = match form {
            Value::List(items) if !items.is_empty() => Value::list(splice(items, threaded)),
            other => Value::list(vec![other.clone(), threaded]),
        };
    }
    Ok(threaded)
}

fn builtin_type(args: &[Value]) -> Result<Value, String> {
    match args {
        [value] => Ok(Value::Type(value.type_desc())),
        _ => Err(format!("type expects 1 argument, got {}", args.len())),
    }
}

fn builtin_to_type(args: &[Value]) -> Result<Value, String> {
    let (desc, value) = match args {
        [Value::Type(desc), value] => (*desc, value),
        _ => return Err("to-type expects a type and a value".to_string()),
    };

    match (desc, value) {
        (TypeDesc::String, v) => Ok(Value::string(v.to_string())),
        (TypeDesc::Symbol, Value::String(s)) => Ok(Value::symbol(s.as_str())),
        (TypeDesc::Symbol, Value::Symbol(_)) => Ok(value.clone()),
        (TypeDesc::Int, Value::Int(_)) => Ok(value.clone()),
        (TypeDesc::Int, Value::Float(f)) => Ok(Value::Int(*f as i64)),
        (TypeDesc::Int, Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| format!("cannot read Int from '{s}'")),
        (TypeDesc::Float, Value::Float(_)) => Ok(value.clone()),
        (TypeDesc::Float, Value::Int(n)) => Ok(Value::Float(*n as f64)),
        (TypeDesc::Float, Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| format!("cannot read Float from '{s}'")),
        (TypeDesc::List, Value::List(_)) => Ok(value.clone()),
        (desc, v) => Err(format!(
            "cannot convert {} to {}",
            v.type_desc().name(),
            desc.name()
        )),
    }
}

fn builtin_impl(args: &[Value]) -> Result<Value, String> {
    match args {
        [value, Value::Type(desc)] => Ok(Value::Bool(desc.matches(value))),
        _ => Err("impl? expects a value and a type".to_string()),
    }
}

fn builtin_realize(args: &[Value]) -> Result<Value, String> {
    match args {
        // All values here are eager, so realization is the identity.
        [value] => Ok(value.clone()),
        _ => Err(format!("realize expects 1 argument, got {}", args.len())),
    }
}

fn builtin_throw(args: &[Value]) -> Result<Value, String> {
    Err(join_display(args, " "))
}

fn builtin_str(args: &[Value]) -> Result<Value, String> {
    Ok(Value::string(join_display(args, "")))
}

fn builtin_add(args: &[Value]) -> Result<Value, String> {
    let mut acc = Num::Int(0);
    for n in as_numbers("+", args)? {
        acc = acc.combine(n, |a, b| a + b, |a, b| a + b);
    }
    Ok(acc.into_value())
}

fn builtin_sub(args: &[Value]) -> Result<Value, String> {
    let nums = as_numbers("-", args)?;
    match nums.split_first() {
        None => Err("- expects at least one argument".to_string()),
        Some((first, [])) => Ok(first.negate().into_value()),
        Some((first, rest)) => {
            let mut acc = *first;
            for n in rest {
                acc = acc.combine(*n, |a, b| a - b, |a, b| a - b);
            }
            Ok(acc.into_value())
        }
    }
}

fn builtin_mul(args: &[Value]) -> Result<Value, String> {
    let mut acc = Num::Int(1);
    for n in as_numbers("*", args)? {
        acc = acc.combine(n, |a, b| a * b, |a, b| a * b);
    }
    Ok(acc.into_value())
}

fn builtin_div(args: &[Value]) -> Result<Value, String> {
    let nums = as_numbers("/", args)?;
    match nums.split_first() {
        None => Err("/ expects at least one argument".to_string()),
        Some((first, [])) => Ok(Num::Int(1).divide(*first)?.into_value()),
        Some((first, rest)) => {
            let mut acc = *first;
            for n in rest {
                acc = acc.divide(*n)?;
            }
            Ok(acc.into_value())
        }
    }
}

fn builtin_eq(args: &[Value]) -> Result<Value, String> {
    match args {
        [a, b] => Ok(Value::Bool(a == b)),
        _ => Err(format!("= expects 2 arguments, got {}", args.len())),
    }
}

fn compare(op: &str, args: &[Value], cmp: fn(f64, f64) -> bool) -> Result<Value, String> {
    match args {
        [a, b] => {
            let a = as_num(a, op)?;
            let b = as_num(b, op)?;
            Ok(Value::Bool(cmp(a.as_float(), b.as_float())))
        }
        _ => Err(format!("{op} expects 2 arguments, got {}", args.len())),
    }
}

fn builtin_println(args: &[Value]) -> Result<Value, String> {
    println!("{}", join_display(args, " "));
    Ok(Value::Nil)
}

fn builtin_printf(args: &[Value]) -> Result<Value, String> {
    let (format, rest) = match args.split_first() {
        Some((Value::String(f), rest)) => (f, rest),
        _ => return Err("printf expects a format string".to_string()),
    };

    let mut out = String::new();
    let mut values = rest.iter();
    let mut remainder = format.as_str();
    while let Some(at) = remainder.find("%v") {
        out.push_str(&remainder[..at]);
        match values.next() {
            Some(value) => out.push_str(&value.to_string()),
            None => return Err("printf: not enough arguments for format".to_string()),
        }
        remainder = &remainder[at + 2..];
    }
    out.push_str(remainder);

    print!("{out}");
    Ok(Value::Nil)
}

fn join_display(args: &[Value], sep: &str) -> String {
    args.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(sep)
}

// ═══════════════════════════════════════════════════════════════════════
// Numeric Tower
// ═══════════════════════════════════════════════════════════════════════

/// Numbers for the arithmetic builtins: integers stay integral until a
/// float enters the computation.
#[derive(Clone, Copy)]
enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    fn as_float(self) -> f64 {
        match self {
            Num::Int(n) => n as f64,
            Num::Float(n) => n,
        }
    }

    fn combine(
        self,
        other: Num,
        int_op: fn(i64, i64) -> i64,
        float_op: fn(f64, f64) -> f64,
    ) -> Num {
        match (self, other) {
            (Num::Int(a), Num::Int(b)) => Num::Int(int_op(a, b)),
            _ => Num::Float(float_op(self.as_float(), other.as_float())),
        }
    }

    fn divide(self, other: Num) -> Result<Num, String> {
        match (self, other) {
            (_, Num::Int(0)) => Err("divide by zero".to_string()),
            (Num::Int(a), Num::Int(b)) if a % b == 0 => Ok(Num::Int(a / b)),
            _ => Ok(Num::Float(self.as_float() / other.as_float())),
        }
    }

    fn negate(self) -> Num {
        match self {
            Num::Int(n) => Num::Int(-n),
            Num::Float(n) => Num::Float(-n),
        }
    }

    fn into_value(self) -> Value {
        match self {
            Num::Int(n) => Value::Int(n),
            Num::Float(n) => Value::Float(n),
        }
    }
}

fn as_num(value: &Value, op: &str) -> Result<Num, String> {
    match value {
        Value::Int(n) => Ok(Num::Int(*n)),
        Value::Float(n) => Ok(Num::Float(*n)),
        other => Err(format!(
            "{op} expects numeric arguments, got {}",
            other.type_desc().name()
        )),
    }
}

fn as_numbers(op: &str, args: &[Value]) -> Result<Vec<Num>, String> {
    args.iter().map(|v| as_num(v, op)).collect()
}
