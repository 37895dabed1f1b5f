use crate::cli::EnergyArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use diffusion_mc::core::energy::energy_of_raw;
use tracing::info;

/// Evaluates the energy of the density given on the command line.
pub fn evaluate(args: &EnergyArgs) -> Result<f64> {
    let entries =
        parser::parse_density_list(&args.density).map_err(|e| CliError::Argument(e.to_string()))?;
    let energy = energy_of_raw(&entries, args.coefficient)?;
    info!(
        positions = entries.len(),
        coefficient = args.coefficient,
        energy,
        "Energy evaluated."
    );
    Ok(energy)
}

pub fn run(args: EnergyArgs) -> Result<()> {
    let energy = evaluate(&args)?;
    println!("{}", energy);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use diffusion_mc::core::density::DensityError;

    fn args(density: &str, coefficient: f64) -> EnergyArgs {
        EnergyArgs {
            density: density.to_string(),
            coefficient,
        }
    }

    #[test]
    fn evaluates_the_pair_count_energy() {
        assert_eq!(evaluate(&args("0,0,3,5,8,4,2,1", 1.0)).unwrap(), 48.0);
        assert_eq!(evaluate(&args("0,0,3,5,8,4,2,1", 0.5)).unwrap(), 24.0);
    }

    #[test]
    fn degenerate_densities_have_zero_energy() {
        assert_eq!(evaluate(&args("", 1.0)).unwrap(), 0.0);
        assert_eq!(evaluate(&args("0", 1.0)).unwrap(), 0.0);
        assert_eq!(evaluate(&args("1,1,1", 1.0)).unwrap(), 0.0);
    }

    #[test]
    fn invalid_entries_surface_density_errors() {
        assert!(matches!(
            evaluate(&args("1,2.5", 1.0)),
            Err(CliError::Density(DensityError::NotInteger { index: 1 }))
        ));
        assert!(matches!(
            evaluate(&args("1,-2", 1.0)),
            Err(CliError::Density(DensityError::Negative { index: 1, value: -2 }))
        ));
        assert!(matches!(
            evaluate(&args("1,oops", 1.0)),
            Err(CliError::Argument(_))
        ));
    }
}
