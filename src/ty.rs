use std::rc::Rc;

pub type TypeId = usize;
pub type TypeRef = Rc<Type>;

#[derive(PartialEq, Eq, Debug)]
pub enum Type {
    /// An unresolved slot, numbered by the fresh-variable counter.
    Variable(TypeId),
    /// `(from -> to)`
    Arrow(TypeRef, TypeRef),
}

impl Type {
    pub fn variable(id: TypeId) -> TypeRef {
        Rc::new(Type::Variable(id))
    }

    pub fn arrow(from: TypeRef, to: TypeRef) -> TypeRef {
        Rc::new(Type::Arrow(from, to))
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Variable(id) => f.write_fmt(format_args!("{id}")),
            Type::Arrow(from, to) => f.write_fmt(format_args!("({from} -> {to})")),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Type::variable(1).to_string(), "1");
        assert_eq!(
            Type::arrow(Type::variable(1), Type::arrow(Type::variable(2), Type::variable(1)))
                .to_string(),
            "(1 -> (2 -> 1))"
        );
    }
}
