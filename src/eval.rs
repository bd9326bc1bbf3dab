use std::rc::Rc;

use rpds::HashTrieMap;
use thiserror::Error;

use crate::term::{Identifier, Lambda, Term, TermRef};

#[derive(Debug, Error)]
pub enum EvalError {
    #[error("Found an unbound variable `{0}`")]
    UnboundVariable(String),
    #[error("No evaluation rule applies to `{0}`")]
    InvalidTerm(String),
}
pub type Result<T> = std::result::Result<T, EvalError>;

/// Names in scope, each bound to the lambda it stood for when it was bound.
/// Extending returns a new map; siblings of a recursive evaluation never
/// observe each other's extensions.
#[derive(Default, Clone, Debug)]
pub struct Environment {
    bindings: HashTrieMap<Identifier, Rc<Lambda>>,
}

impl Environment {
    pub fn lookup(&self, name: &Identifier) -> Option<Rc<Lambda>> {
        self.bindings.get(name).cloned()
    }

    pub fn bound(&self, name: Identifier, value: Rc<Lambda>) -> Self {
        Self {
            bindings: self.bindings.insert(name, value),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut entries = self.bindings.iter().collect::<Vec<_>>();
        entries.sort_by(|l, r| l.0.cmp(r.0));
        f.write_str("{")?;
        for (name, lambda) in entries {
            f.write_fmt(format_args!(" {name} = {lambda} "))?;
        }
        f.write_str("}")
    }
}

/// A closure: a lambda plus the environment interpreting its free names.
#[derive(Clone, derive_more::Display, Debug)]
#[display(fmt = "{lambda} {env}")]
pub struct Value {
    pub lambda: Rc<Lambda>,
    pub env: Environment,
}

pub fn evaluate(term: &TermRef) -> Result<Value> {
    evaluate_in(term, &Environment::default())
}

fn evaluate_in(term: &TermRef, env: &Environment) -> Result<Value> {
    match term.as_ref() {
        // Already a value.
        Term::Abs(lambda) => Ok(Value {
            lambda: lambda.clone(),
            env: env.clone(),
        }),
        Term::Var(name) => {
            let lambda = lookup(env, name)?;
            Ok(Value {
                lambda,
                env: env.clone(),
            })
        }
        Term::Apply(lhs, rhs) => match (lhs.as_ref(), rhs.as_ref()) {
            // Redex: bind the argument and reduce the body.
            (Term::Abs(fun), Term::Abs(arg)) => {
                let env = env.bound(fun.param.clone(), arg.clone());
                evaluate_in(&fun.body, &env)
            }
            // Reduce the argument to a lambda first.
            (Term::Abs(_), _) => {
                let arg = evaluate_in(rhs, env)?;
                let term = Term::apply(lhs.clone(), Rc::new(Term::Abs(arg.lambda)));
                evaluate_in(&term, env)
            }
            // Reduce the head to a lambda, keeping the bindings that its
            // evaluation introduced.
            (_, Term::Abs(_)) => {
                let fun = evaluate_in(lhs, env)?;
                let term = Term::apply(Rc::new(Term::Abs(fun.lambda)), rhs.clone());
                evaluate_in(&term, &fun.env)
            }
            // An identifier in head position stands for its bound lambda.
            (Term::Var(name), _) => {
                let lambda = lookup(env, name)?;
                let term = Term::apply(Rc::new(Term::Abs(lambda)), rhs.clone());
                evaluate_in(&term, env)
            }
            _ => Err(EvalError::InvalidTerm(term.to_string())),
        },
    }
}

fn lookup(env: &Environment, name: &Identifier) -> Result<Rc<Lambda>> {
    env.lookup(name)
        .ok_or_else(|| EvalError::UnboundVariable(name.to_string()))
}

#[cfg(test)]
mod test {
    use super::*;

    fn name(s: &str) -> Identifier {
        Rc::new(s.to_string())
    }

    fn identity() -> TermRef {
        Term::lambda("x", Term::var("x"))
    }

    fn tru() -> TermRef {
        Term::lambda("a", Term::lambda("b", Term::var("a")))
    }

    fn fls() -> TermRef {
        Term::lambda("a", Term::lambda("b", Term::var("b")))
    }

    #[test]
    fn test_identity_application() {
        let value = evaluate(&Term::apply(identity(), identity())).unwrap();
        assert_eq!(value.lambda.to_string(), "λx.x");
        assert_eq!(value.to_string(), "λx.x { x = λx.x }");
    }

    #[test]
    fn test_selector() {
        // ((λa.λb.λc.a) I True) False reduces to the first argument.
        let selector = Term::apply(
            Term::apply(
                Term::apply(
                    Term::lambda("a", Term::lambda("b", Term::lambda("c", Term::var("a")))),
                    identity(),
                ),
                tru(),
            ),
            fls(),
        );
        let value = evaluate(&selector).unwrap();
        assert_eq!(value.lambda.to_string(), "λx.x");
    }

    #[test]
    fn test_boolean_selection() {
        let first = evaluate(&Term::apply(Term::apply(tru(), identity()), fls())).unwrap();
        assert_eq!(first.lambda.to_string(), "λx.x");

        let not = Term::lambda("p", Term::apply(Term::apply(Term::var("p"), fls()), tru()));
        let negated = evaluate(&Term::apply(not, tru())).unwrap();
        assert_eq!(negated.lambda.to_string(), "λa.λb.b");
    }

    #[test]
    fn test_identifier_head() {
        // (λa.(a a)) True: the inner head is an identifier and is resolved
        // through the environment before reapplying.
        let self_apply = Term::lambda("a", Term::apply(Term::var("a"), Term::var("a")));
        let value = evaluate(&Term::apply(self_apply, tru())).unwrap();
        assert_eq!(value.lambda.to_string(), "λb.a");
    }

    #[test]
    fn test_unbound_variable() {
        assert!(matches!(
            evaluate(&Term::var("x")),
            Err(EvalError::UnboundVariable(_))
        ));
        // (λx.y) I fails while reducing the body.
        let stuck = Term::apply(Term::lambda("x", Term::var("y")), identity());
        assert!(matches!(
            evaluate(&stuck),
            Err(EvalError::UnboundVariable(_))
        ));
    }

    #[test]
    fn test_invalid_shape() {
        // An application headed by an application whose argument is also an
        // application matches no rule.
        let redex = Term::apply(identity(), identity());
        let stuck = Term::apply(redex.clone(), redex);
        assert!(matches!(evaluate(&stuck), Err(EvalError::InvalidTerm(_))));
    }

    #[test]
    fn test_environment_isolation() {
        let base = Environment::default();
        let left = Term::apply(Term::lambda("a", Term::var("a")), identity());
        let right = Term::apply(Term::lambda("b", Term::var("b")), identity());
        let left = evaluate_in(&left, &base).unwrap();
        let right = evaluate_in(&right, &base).unwrap();
        assert!(left.env.lookup(&name("a")).is_some());
        assert!(left.env.lookup(&name("b")).is_none());
        assert!(right.env.lookup(&name("b")).is_some());
        assert!(right.env.lookup(&name("a")).is_none());
        assert!(base.lookup(&name("a")).is_none());
        assert!(base.lookup(&name("b")).is_none());
    }
}
