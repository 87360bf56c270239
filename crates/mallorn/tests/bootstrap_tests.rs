//! Bootstrap registration and builtin behavior tests

use pretty_assertions::assert_eq;

use mallorn::*;

fn invoke(env: &Environment, symbol: &str, args: &[Value]) -> std::result::Result<Value, String> {
    env.resolve(symbol).unwrap().invoke(args)
}

// ═══════════════════════════════════════════════════════════════════════
// Registration
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_special_forms_registered_in_core() {
    let env = Environment::new();

    let forms = [
        ("core/do", SpecialForm::Do),
        ("core/def", SpecialForm::Def),
        ("core/if", SpecialForm::If),
        ("core/fn*", SpecialForm::Fn),
        ("core/macro*", SpecialForm::Macro),
        ("core/let*", SpecialForm::Let),
        ("core/quote", SpecialForm::Quote),
        ("core/syntax-quote", SpecialForm::SyntaxQuote),
    ];
    for (symbol, form) in forms {
        assert_eq!(env.resolve(symbol).unwrap(), Value::SpecialForm(form));
    }
}

#[test]
fn test_special_forms_visible_unqualified() {
    let env = Environment::new();

    for symbol in ["do", "def", "if", "fn*", "macro*", "let*", "quote", "syntax-quote"] {
        assert!(env.resolve(symbol).is_ok(), "{symbol} did not resolve");
    }
}

#[test]
fn test_type_descriptors_registered() {
    let env = Environment::new();

    assert_eq!(env.resolve("types/Seq").unwrap(), Value::Type(TypeDesc::Seq));
    assert_eq!(
        env.resolve("types/Invokable").unwrap(),
        Value::Type(TypeDesc::Invokable)
    );
}

#[test]
fn test_division_is_bound_at_the_separator_name() {
    let env = Environment::new();

    // The local name of the division builtin is the separator itself
    assert!(matches!(env.resolve("core//").unwrap(), Value::Builtin(_)));
    assert_eq!(env.resolve("/").unwrap(), env.resolve("core//").unwrap());
}

#[test]
fn test_eval_is_not_registered() {
    // Evaluation is the evaluator collaborator's entry; the adapter that
    // embeds it installs that binding, not the bootstrap pass.
    let env = Environment::new();
    assert!(env.resolve("eval").is_err());
}

// ═══════════════════════════════════════════════════════════════════════
// Namespace-Switch Primitive
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_ns_primitive_switches_namespace() {
    let env = Environment::new();

    let ns = env.resolve("ns").unwrap();
    assert_eq!(ns.invoke(&[Value::symbol("scratch")]).unwrap(), Value::Nil);

    assert_eq!(env.current_namespace(), "scratch");
    assert_eq!(env.resolve("*ns*").unwrap(), Value::symbol("scratch"));
}

#[test]
fn test_ns_primitive_rejects_non_symbols() {
    let env = Environment::new();

    let ns = env.resolve("ns").unwrap();
    assert!(ns.invoke(&[Value::Int(1)]).is_err());
    assert!(ns.invoke(&[]).is_err());
}

// ═══════════════════════════════════════════════════════════════════════
// Arithmetic
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_addition() {
    let env = Environment::new();

    assert_eq!(invoke(&env, "+", &[]).unwrap(), Value::Int(0));
    assert_eq!(
        invoke(&env, "+", &[Value::Int(1), Value::Int(2), Value::Int(3)]).unwrap(),
        Value::Int(6)
    );
    // A float anywhere promotes the whole computation
    assert_eq!(
        invoke(&env, "+", &[Value::Int(1), Value::Float(2.5)]).unwrap(),
        Value::Float(3.5)
    );
}

#[test]
fn test_subtraction() {
    let env = Environment::new();

    assert_eq!(
        invoke(&env, "-", &[Value::Int(10), Value::Int(3), Value::Int(2)]).unwrap(),
        Value::Int(5)
    );
    assert_eq!(invoke(&env, "-", &[Value::Int(4)]).unwrap(), Value::Int(-4));
    assert!(invoke(&env, "-", &[]).is_err());
}

#[test]
fn test_multiplication() {
    let env = Environment::new();

    assert_eq!(invoke(&env, "*", &[]).unwrap(), Value::Int(1));
    assert_eq!(
        invoke(&env, "*", &[Value::Int(2), Value::Int(3), Value::Int(4)]).unwrap(),
        Value::Int(24)
    );
}

#[test]
fn test_division() {
    let env = Environment::new();

    assert_eq!(
        invoke(&env, "/", &[Value::Int(6), Value::Int(3)]).unwrap(),
        Value::Int(2)
    );
    assert_eq!(
        invoke(&env, "/", &[Value::Int(7), Value::Int(2)]).unwrap(),
        Value::Float(3.5)
    );
    // Single argument is the reciprocal
    assert_eq!(
        invoke(&env, "/", &[Value::Int(2)]).unwrap(),
        Value::Float(0.5)
    );
    assert!(invoke(&env, "/", &[Value::Int(1), Value::Int(0)]).is_err());
}

#[test]
fn test_arithmetic_rejects_non_numbers() {
    let env = Environment::new();

    let err = invoke(&env, "+", &[Value::string("one")]).unwrap_err();
    assert!(err.contains("numeric"));
}

// ═══════════════════════════════════════════════════════════════════════
// Comparison
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_equality_is_structural() {
    let env = Environment::new();

    assert_eq!(
        invoke(&env, "=", &[Value::string("a"), Value::string("a")]).unwrap(),
        Value::Bool(true)
    );
    // Different concrete types never compare equal
    assert_eq!(
        invoke(&env, "=", &[Value::Int(1), Value::Float(1.0)]).unwrap(),
        Value::Bool(false)
    );
    assert!(invoke(&env, "=", &[Value::Int(1)]).is_err());
}

#[test]
fn test_numeric_ordering() {
    let env = Environment::new();

    assert_eq!(
        invoke(&env, ">", &[Value::Int(2), Value::Int(1)]).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        invoke(&env, "<", &[Value::Int(2), Value::Int(1)]).unwrap(),
        Value::Bool(false)
    );
    assert_eq!(
        invoke(&env, ">=", &[Value::Int(2), Value::Float(2.0)]).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        invoke(&env, "<=", &[Value::Float(1.5), Value::Int(2)]).unwrap(),
        Value::Bool(true)
    );
}

#[test]
fn test_ordering_requires_numbers() {
    let env = Environment::new();
    assert!(invoke(&env, ">", &[Value::string("b"), Value::Int(1)]).is_err());
}

// ═══════════════════════════════════════════════════════════════════════
// Strings and IO
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_str_concatenates_display_forms() {
    let env = Environment::new();

    assert_eq!(
        invoke(&env, "str", &[Value::string("pi = "), Value::Float(3.14)]).unwrap(),
        Value::string("pi = 3.14")
    );
    assert_eq!(invoke(&env, "str", &[]).unwrap(), Value::string(""));
}

#[test]
fn test_println_returns_nil() {
    let env = Environment::new();
    assert_eq!(
        invoke(&env, "println", &[Value::string("hello")]).unwrap(),
        Value::Nil
    );
}

#[test]
fn test_printf_substitutes_verbs() {
    let env = Environment::new();

    assert_eq!(
        invoke(
            &env,
            "printf",
            &[Value::string("x=%v\n"), Value::Int(7)]
        )
        .unwrap(),
        Value::Nil
    );
}

#[test]
fn test_printf_requires_format_string() {
    let env = Environment::new();

    assert!(invoke(&env, "printf", &[Value::Int(1)]).is_err());
    assert!(invoke(&env, "printf", &[]).is_err());
}

#[test]
fn test_printf_rejects_short_argument_list() {
    let env = Environment::new();

    let err = invoke(&env, "printf", &[Value::string("%v %v"), Value::Int(1)]).unwrap_err();
    assert!(err.contains("not enough arguments"));
}

// ═══════════════════════════════════════════════════════════════════════
// Type Introspection
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_type_returns_descriptor() {
    let env = Environment::new();

    assert_eq!(
        invoke(&env, "type", &[Value::Int(1)]).unwrap(),
        Value::Type(TypeDesc::Int)
    );
    assert_eq!(
        invoke(&env, "type", &[Value::list(vec![])]).unwrap(),
        Value::Type(TypeDesc::List)
    );
}

#[test]
fn test_to_type_converts_between_primitives() {
    let env = Environment::new();

    assert_eq!(
        invoke(
            &env,
            "to-type",
            &[Value::Type(TypeDesc::Int), Value::Float(3.9)]
        )
        .unwrap(),
        Value::Int(3)
    );
    assert_eq!(
        invoke(
            &env,
            "to-type",
            &[Value::Type(TypeDesc::Float), Value::string("2.5")]
        )
        .unwrap(),
        Value::Float(2.5)
    );
    assert_eq!(
        invoke(
            &env,
            "to-type",
            &[Value::Type(TypeDesc::String), Value::Int(42)]
        )
        .unwrap(),
        Value::string("42")
    );
    assert!(invoke(
        &env,
        "to-type",
        &[Value::Type(TypeDesc::List), Value::Int(42)]
    )
    .is_err());
}

#[test]
fn test_impl_checks_capabilities() {
    let env = Environment::new();

    let seq = env.resolve("types/Seq").unwrap();
    let invokable = env.resolve("types/Invokable").unwrap();

    assert_eq!(
        invoke(&env, "impl?", &[Value::list(vec![]), seq.clone()]).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        invoke(&env, "impl?", &[Value::Int(1), seq]).unwrap(),
        Value::Bool(false)
    );

    let plus = env.resolve("+").unwrap();
    assert_eq!(
        invoke(&env, "impl?", &[plus, invokable]).unwrap(),
        Value::Bool(true)
    );
}

#[test]
fn test_realize_is_identity_on_eager_values() {
    let env = Environment::new();

    let form = Value::list(vec![Value::Int(1), Value::Int(2)]);
    assert_eq!(invoke(&env, "realize", &[form.clone()]).unwrap(), form);
}

#[test]
fn test_throw_raises_its_message() {
    let env = Environment::new();

    let err = invoke(&env, "throw", &[Value::string("boom")]).unwrap_err();
    assert!(err.contains("boom"));
}

// ═══════════════════════════════════════════════════════════════════════
// Threading Rewrites
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_thread_first_inserts_after_operator() {
    let env = Environment::new();

    let result = invoke(
        &env,
        "->",
        &[
            Value::Int(1),
            Value::list(vec![Value::symbol("+"), Value::Int(2)]),
            Value::list(vec![Value::symbol("-"), Value::Int(10)]),
        ],
    )
    .unwrap();
    assert_eq!(result.to_string(), "(- (+ 1 2) 10)");
}

#[test]
fn test_thread_last_appends_to_form() {
    let env = Environment::new();

    let result = invoke(
        &env,
        "->>",
        &[
            Value::Int(1),
            Value::list(vec![Value::symbol("+"), Value::Int(2)]),
            Value::list(vec![Value::symbol("-"), Value::Int(10)]),
        ],
    )
    .unwrap();
    assert_eq!(result.to_string(), "(- 10 (+ 2 1))");
}

#[test]
fn test_thread_wraps_bare_forms() {
    let env = Environment::new();

    let result = invoke(&env, "->", &[Value::Int(5), Value::symbol("inc")]).unwrap();
    assert_eq!(result.to_string(), "(inc 5)");

    assert!(invoke(&env, "->", &[]).is_err());
}
