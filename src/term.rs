use std::rc::Rc;

pub type Identifier = Rc<String>;
pub type TermRef = Rc<Term>;

/// `λx.t` — the parameter is an identifier by construction, never an
/// arbitrary pattern.
#[derive(PartialEq, Eq, Debug)]
pub struct Lambda {
    pub param: Identifier,
    pub body: TermRef,
}

#[derive(PartialEq, Eq, Debug)]
pub enum Term {
    /// `x`
    Var(Identifier),
    /// `λx.t`
    Abs(Rc<Lambda>),
    /// `(t t)`
    Apply(TermRef, TermRef),
}

impl Term {
    pub fn var(name: impl Into<String>) -> TermRef {
        Rc::new(Term::Var(Rc::new(name.into())))
    }

    pub fn lambda(param: impl Into<String>, body: TermRef) -> TermRef {
        Rc::new(Term::Abs(Rc::new(Lambda {
            param: Rc::new(param.into()),
            body,
        })))
    }

    pub fn apply(lhs: TermRef, rhs: TermRef) -> TermRef {
        Rc::new(Term::Apply(lhs, rhs))
    }
}

impl std::fmt::Display for Lambda {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("λ{}.{}", self.param, self.body))
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Var(name) => f.write_str(name),
            Term::Abs(lambda) => f.write_fmt(format_args!("{lambda}")),
            Term::Apply(lhs, rhs) => f.write_fmt(format_args!("({lhs} {rhs})")),
        }
    }
}
