use rpds::HashTrieMap;
use thiserror::Error;

use crate::term::{Identifier, Term, TermRef};
use crate::ty::{Type, TypeId, TypeRef};

#[derive(Debug, Error)]
pub enum TypeError {
    #[error("Found a free variable `{0}`")]
    FreeVariable(String),
}
pub type Result<T> = std::result::Result<T, TypeError>;

/// Names in scope, each bound to a type; scoped like the evaluator's
/// environment.
#[derive(Default, Clone, Debug)]
struct Bindings {
    types: HashTrieMap<Identifier, TypeRef>,
}

impl Bindings {
    fn lookup(&self, name: &Identifier) -> Option<TypeRef> {
        self.types.get(name).cloned()
    }

    fn bound(&self, name: Identifier, ty: TypeRef) -> Self {
        Self {
            types: self.types.insert(name, ty),
        }
    }
}

/// Aliases recorded for type variables during inference. Recording an alias
/// for a variable overwrites any previous one; constraints are never merged.
#[derive(Default, Clone, Debug)]
pub struct Substitution {
    aliases: HashTrieMap<TypeId, TypeRef>,
}

impl Substitution {
    fn aliased(&self, variable: TypeId, ty: TypeRef) -> Self {
        Self {
            aliases: self.aliases.insert(variable, ty),
        }
    }

    /// Replaces a variable with its aliased type, chasing variables nested
    /// inside arrow aliases as well. A type that is not an aliased variable
    /// is returned unchanged. There is no occurs-check: a self-referential
    /// alias makes this recurse forever.
    pub fn resolve(&self, ty: &TypeRef) -> TypeRef {
        if let Type::Variable(id) = ty.as_ref() {
            if let Some(aliased) = self.aliases.get(id) {
                return if let Type::Arrow(from, to) = aliased.as_ref() {
                    Type::arrow(self.resolve(from), self.resolve(to))
                } else {
                    aliased.clone()
                };
            }
        }
        ty.clone()
    }
}

struct Inferred {
    ty: TypeRef,
    next: TypeId,
    subst: Substitution,
}

pub fn infer(term: &TermRef) -> Result<TypeRef> {
    let inferred = infer_in(term, 1, &Bindings::default(), Substitution::default())?;
    Ok(resolve_variables(&inferred.ty, &inferred.subst))
}

/// Passes every variable occurring in the final type through the
/// substitution.
fn resolve_variables(ty: &TypeRef, subst: &Substitution) -> TypeRef {
    match ty.as_ref() {
        Type::Variable(_) => subst.resolve(ty),
        Type::Arrow(from, to) => Type::arrow(
            resolve_variables(from, subst),
            resolve_variables(to, subst),
        ),
    }
}

fn infer_in(
    term: &TermRef,
    next: TypeId,
    bindings: &Bindings,
    subst: Substitution,
) -> Result<Inferred> {
    match term.as_ref() {
        Term::Var(name) => {
            let ty = bindings
                .lookup(name)
                .ok_or_else(|| TypeError::FreeVariable(name.to_string()))?;
            Ok(Inferred { ty, next, subst })
        }
        Term::Abs(lambda) => {
            let param = Type::variable(next);
            let bindings = bindings.bound(lambda.param.clone(), param.clone());
            let body = infer_in(&lambda.body, next + 1, &bindings, subst)?;
            let from = body.subst.resolve(&param);
            Ok(Inferred {
                ty: Type::arrow(from, body.ty),
                next: body.next,
                subst: body.subst,
            })
        }
        Term::Apply(lhs, rhs) => match (lhs.as_ref(), rhs.as_ref()) {
            // Mirrors the evaluator's redex case: the argument's type is
            // inferred first and bound to the parameter name.
            (Term::Abs(fun), Term::Abs(_)) => {
                let arg = infer_in(rhs, next, bindings, subst)?;
                let bindings = bindings.bound(fun.param.clone(), arg.ty);
                infer_in(&fun.body, arg.next, &bindings, arg.subst)
            }
            _ => {
                let arg = infer_in(rhs, next, bindings, subst)?;
                let result = Type::variable(arg.next);
                let fun = infer_in(lhs, arg.next + 1, bindings, arg.subst)?;
                // The sole unification step: a variable in head position is
                // aliased to an arrow from the argument type to the result.
                let subst = if let Type::Variable(variable) = fun.ty.as_ref() {
                    fun.subst.aliased(*variable, Type::arrow(arg.ty, result.clone()))
                } else {
                    fun.subst
                };
                Ok(Inferred {
                    ty: result,
                    next: fun.next,
                    subst,
                })
            }
        },
    }
}
