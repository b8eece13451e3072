use kotva::hooks::{StopAfterIterations, StopWhenChangeLess};
use kotva::nalgebra::{Dyn, OVector};
use kotva::projection::{SigmaSimplex, SparseSimplex};
use kotva::{minimize, objective, State};

fn main() -> Result<(), String> {
    // f(x) = Σ (xᵢ - cᵢ)²
    let center = OVector::<f64, Dyn>::from_vec(vec![0.9, 0.1, 0.8, -0.4]);
    let f = objective(
        |x: &OVector<f64, Dyn>| (x - &center).norm_squared(),
        |x: &OVector<f64, Dyn>, grad: &mut OVector<f64, Dyn>| {
            grad.copy_from(&((x - &center) * 2.0))
        },
    );

    let initial = vec![0.25; 4];

    let dense = State::builder()
        .with_initial(initial.clone())
        .with_step_size(0.25)
        .with_projection(SigmaSimplex::new(1.0))
        .with_hook(StopWhenChangeLess::new(1e-12))
        .with_hook(StopAfterIterations::new(10_000))
        .build()
        .map_err(|error| format!("{error}"))?;

    let sparse = State::builder()
        .with_initial(initial)
        .with_step_size(0.25)
        .with_projection(SparseSimplex::new(1, 1.0))
        .with_hook(StopWhenChangeLess::new(1e-12))
        .with_hook(StopAfterIterations::new(10_000))
        .build()
        .map_err(|error| format!("{error}"))?;

    let dense = minimize(&f, &dense).map_err(|error| format!("{error}"))?;
    let sparse = minimize(&f, &sparse).map_err(|error| format!("{error}"))?;

    println!(
        "simplex:        iter = {}\tfx = {:?}\tx = {:?}",
        dense.iter(),
        dense.fx(),
        dense.x().as_slice()
    );
    println!(
        "sparse simplex: iter = {}\tfx = {:?}\tx = {:?}",
        sparse.iter(),
        sparse.fx(),
        sparse.x().as_slice()
    );

    Ok(())
}
