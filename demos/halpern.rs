use kotva::hooks::{HalpernIteration, StopAfterIterations, StopWhen};
use kotva::nalgebra as na;
use kotva::{minimize_mut, Context, Differentiable, Function, IterState, Problem, State};
use na::{Dyn, OVector};

// f(x) = (x₁ + x₂ - 2)², every point of the line x₁ + x₂ = 2 is a minimizer.
struct LeastSquares;

impl Problem for LeastSquares {
    type Field = f64;
}

impl Function for LeastSquares {
    fn apply(&self, x: &OVector<f64, Dyn>) -> f64 {
        (x[0] + x[1] - 2.0).powi(2)
    }
}

impl Differentiable for LeastSquares {
    fn gradient(&self, x: &OVector<f64, Dyn>, grad: &mut OVector<f64, Dyn>) {
        grad.fill(2.0 * (x[0] + x[1] - 2.0));
    }
}

fn main() -> Result<(), String> {
    let f = LeastSquares;
    let anchor = vec![10.0, -4.0];

    let mut state = State::builder()
        .with_initial(vec![100.0, 50.0])
        .with_step_size(0.1)
        .with_hook(HalpernIteration::harmonic(anchor))
        .with_hook(StopWhen::new(|state: &IterState<f64>, _: &Context<f64>| {
            if state.iter() % 10_000 == 0 {
                println!(
                    "iter = {}\tfx = {:?}\tx = {:?}",
                    state.iter(),
                    state.fx(),
                    state.x().as_slice()
                );
            }
            state.change() < 1e-9
        }))
        .with_hook(StopAfterIterations::new(1_000_000))
        .build()
        .map_err(|error| format!("{error}"))?;

    let solution = minimize_mut(&f, &mut state).map_err(|error| format!("{error}"))?;

    // The minimizer nearest to the anchor is (8, -6).
    println!(
        "iter = {}\tfx = {}\tx = {:?}",
        solution.iter(),
        solution.fx(),
        solution.x().as_slice()
    );

    if (solution.x() - na::dvector![8.0, -6.0]).norm() < 1e-3 {
        Ok(())
    } else {
        Err("did not converge".to_string())
    }
}
