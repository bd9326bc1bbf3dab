use anyhow::Result;

use crate::term::Term;

mod eval;
mod infer;
mod term;
mod ty;

fn main() -> Result<()> {
    let identity = Term::lambda("x", Term::var("x"));
    println!("Identity = {identity}");

    let applied = Term::apply(identity.clone(), identity.clone());
    println!("I(I) = {applied}");
    println!("I(I) => {}", eval::evaluate(&applied)?);

    let tru = Term::lambda("a", Term::lambda("b", Term::var("a")));
    let fls = Term::lambda("a", Term::lambda("b", Term::var("b")));
    println!("True = {tru}");
    println!("False = {fls}");

    let selector = Term::apply(
        Term::apply(
            Term::apply(
                Term::lambda("a", Term::lambda("b", Term::lambda("c", Term::var("a")))),
                identity.clone(),
            ),
            tru.clone(),
        ),
        fls.clone(),
    );
    println!("(a=>b=>c=>a)(I)(T)(F) = {}", eval::evaluate(&selector)?);

    let chosen = Term::apply(Term::apply(tru.clone(), identity.clone()), fls.clone());
    println!("(True(Identity))(False) => {}", eval::evaluate(&chosen)?);

    println!("True = {tru} :: {}", infer::infer(&tru)?);
    println!("False = {fls} :: {}", infer::infer(&fls)?);

    let true_identity = Term::apply(tru.clone(), identity.clone());
    println!(
        "(True Identity) = {true_identity} :: {}",
        infer::infer(&true_identity)?
    );
    let identity_false = Term::apply(identity.clone(), fls.clone());
    println!(
        "(Identity False) = {identity_false} :: {}",
        infer::infer(&identity_false)?
    );

    // Inferring a type for self-application would chase a self-referential
    // alias forever, so only evaluation is shown for it.
    let self_apply = Term::lambda("a", Term::apply(Term::var("a"), Term::var("a")));
    println!("AAA = {self_apply}");
    let applied_self = Term::apply(self_apply.clone(), tru.clone());
    println!("(AAA True) = {}", eval::evaluate(&applied_self)?);

    let not = Term::lambda(
        "p",
        Term::apply(Term::apply(Term::var("p"), fls.clone()), tru.clone()),
    );
    println!("Not = {not} :: {}", infer::infer(&not)?);
    let not_true = Term::apply(not.clone(), tru.clone());
    println!("Not(True) = {}", eval::evaluate(&not_true)?);

    let apply_identity = Term::lambda(
        "a",
        Term::apply(Term::var("a"), Term::lambda("x", Term::var("x"))),
    );
    println!("{apply_identity} :: {}", infer::infer(&apply_identity)?);

    let applicator = Term::lambda(
        "a",
        Term::lambda("b", Term::apply(Term::var("a"), Term::var("b"))),
    );
    println!("{applicator} :: {}", infer::infer(&applicator)?);

    Ok(())
}
