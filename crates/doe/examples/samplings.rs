use hypercube_doe::{Assembler, DoeError, Lhs, LhsKind, ParameterDef};
use ndarray::arr2;

fn main() -> Result<(), DoeError> {
    let xlimits = arr2(&[[0., 1.], [-10., 10.], [5., 15.]]);
    let n = 10;

    println!("Take {n} samples in");
    println!("{xlimits}\n");

    println!("*** using classic latin hypercube sampling");
    let samples = Lhs::new(&xlimits)?.seed(Some(42)).sample(n)?;
    println!("{samples}\n");

    println!("*** using centered latin hypercube sampling");
    let samples = Lhs::new(&xlimits)?.kind(LhsKind::Centered).sample(n)?;
    println!("{samples}\n");

    println!("*** using typed parameters");
    let defs = vec![
        ParameterDef::continuous("temperature", 280., 320.),
        ParameterDef::unsupported("operator"),
        ParameterDef::integer("batches", 1, 5),
    ];
    let experiments = Assembler::new().seed(Some(42)).assemble(n, &defs)?;
    println!("columns: {:?}", experiments.ids());
    println!("{}", experiments.discretized());
    Ok(())
}
