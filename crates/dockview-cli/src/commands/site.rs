use crate::cli::SiteArgs;
use crate::config::PartialConfig;
use crate::error::{CliError, Result};
use dockview::core::io::pdb::PdbFile;
use dockview::core::io::traits::StructureReader;
use dockview::core::models::protein::BindingSite;
use dockview::core::profiles::{ProteinProfile, ProteinProfileRegistry};
use dockview::engine::binding_site;
use dockview::engine::error::EngineError;
use std::path::Path;
use tracing::info;

fn load_profile(id: &str, registry_path: &Path) -> Result<ProteinProfile> {
    let registry = ProteinProfileRegistry::load(registry_path).map_err(EngineError::from)?;
    registry
        .get(id)
        .cloned()
        .ok_or_else(|| EngineError::UnknownProfile(id.to_string()).into())
}

fn print_site(site: &BindingSite) {
    let c = site.center;
    let s = site.size;
    println!("Center (Å):  {:.2} {:.2} {:.2}", c.x, c.y, c.z);
    println!("Size (Å):    {:.2} {:.2} {:.2}", s.x, s.y, s.z);
}

pub fn run(args: SiteArgs) -> Result<()> {
    let profile = match (&args.profile, &args.profiles) {
        (Some(id), Some(path)) => Some(load_profile(id, path)?),
        (Some(_), None) => {
            return Err(CliError::Argument(
                "--profile requires --profiles <PATH>".to_string(),
            ));
        }
        _ => None,
    };

    if let Some(profile) = &profile {
        println!("Profile:     {} ({})", profile.name, profile.id);
        if !profile.description.is_empty() {
            println!("             {}", profile.description);
        }
    }

    let Some(protein_path) = &args.protein else {
        if let Some(profile) = &profile {
            print_site(&profile.binding_site);
        }
        return Ok(());
    };

    let partial_config = PartialConfig::load(args.config.as_deref())?;
    let site_config = partial_config.merge_binding_site(
        &args,
        profile.as_ref().map(|p| p.key_residues.as_slice()),
    )?;

    info!("Reading receptor from {:?}", protein_path);
    let protein = PdbFile::read_from_path(protein_path).map_err(|e| CliError::FileParsing {
        path: protein_path.clone(),
        source: e.into(),
    })?;
    println!(
        "Receptor:    {} ({} ATOM records)",
        protein_path.display(),
        protein.polymer_atom_count()
    );

    let estimate = binding_site::estimate(&protein, &site_config);
    if estimate.is_fallback() {
        println!("No atoms matched the residue selection; showing the default box.");
    } else {
        println!("Atoms used:  {}", estimate.atoms_used);
    }
    print_site(&estimate.site);
    Ok(())
}
