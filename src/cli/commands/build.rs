//! `chd build` command - Configure a Series 80 connector part number
//!
//! Drives a [`BuilderSession`] either from flags or through an interactive
//! wizard. Whenever a flag is omitted and the catalog offers exactly one
//! candidate for that step, the candidate is taken.

use console::style;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};
use miette::{IntoDiagnostic, Result};
use std::collections::HashSet;
use tracing::debug;

use crate::cli::helpers::{escape_csv, open_catalog, resolve_format};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Catalog;
use crate::entities::{Contact, ContactType};
use crate::glenair::shell::{shell_style_label, SHELL_STYLES};
use crate::glenair::wire::{parse_value, WireSystem};
use crate::glenair::{BuilderResult, BuilderSession};

#[derive(clap::Args, Debug)]
pub struct BuildArgs {
    /// Wire system (awg, mm2); defaults to config `wire_system`
    #[arg(long, short = 's', value_parser = parse_system)]
    pub wire_system: Option<WireSystem>,

    /// Wire size (e.g. 20, 1/0, 0.52)
    #[arg(long, short = 'w', required_unless_present = "interactive")]
    pub wire: Option<String>,

    /// Number of conductors (total contacts in the arrangement)
    #[arg(long, short = 'n', default_value_t = 1)]
    pub conductors: u32,

    /// Contact size; required when the wire fits more than one size
    #[arg(long)]
    pub contact_size: Option<String>,

    /// Contact part number; repeat to select several (the first drives the part number)
    #[arg(long = "contact", short = 'c')]
    pub contacts: Vec<String>,

    /// Contact type, used when a part number exists as both pin and socket
    #[arg(long, short = 't', value_parser = parse_contact_type)]
    pub contact_type: Option<ContactType>,

    /// Arrangement; required when more than one fits
    #[arg(long, short = 'a')]
    pub arrangement: Option<String>,

    /// Shell style code; defaults to config `shell_style`
    #[arg(long)]
    pub shell_style: Option<String>,

    /// Walk through each step with interactive prompts
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

fn parse_system(s: &str) -> Result<WireSystem, String> {
    s.parse()
}

fn parse_contact_type(s: &str) -> Result<ContactType, String> {
    s.parse()
}

pub fn run(args: BuildArgs, global: &GlobalOpts) -> Result<()> {
    let (_, config, catalog) = open_catalog(global)?;
    let format = resolve_format(global, &config);

    let wire_system = args.wire_system.unwrap_or_else(|| config.wire_system());
    let shell_style = args
        .shell_style
        .clone()
        .or_else(|| config.shell_style().map(String::from));

    let mut session = BuilderSession::new();
    let result = if args.interactive {
        run_wizard(&catalog, &mut session, wire_system, shell_style.as_deref())?
    } else {
        run_flags(&catalog, &mut session, &args, wire_system, shell_style.as_deref())?
    };

    print_result(&result, format, global.quiet)
}

fn run_flags(
    catalog: &Catalog,
    session: &mut BuilderSession,
    args: &BuildArgs,
    wire_system: WireSystem,
    shell_style: Option<&str>,
) -> Result<BuilderResult> {
    let wire = args
        .wire
        .as_deref()
        .ok_or_else(|| miette::miette!("--wire is required without --interactive"))?;
    if parse_value(wire).is_none() {
        return Err(miette::miette!(
            "'{}' is not a valid {} wire size",
            wire,
            wire_system.label()
        ));
    }

    // Wire -> contact sizes
    let sizes = session.commit_wire(catalog, wire_system, wire, args.conductors)?;
    let contact_size = pick_one(
        args.contact_size.as_deref(),
        sizes,
        |s| s.as_str(),
        "contact size",
        "--contact-size",
    )
    .map_err(|e| e.wrap_err(format!("wire {} {}", wire, wire_system.label())))?;

    // Contact size -> contacts and arrangements
    session.select_contact_size(catalog, &contact_size)?;

    // Contacts
    let chosen = choose_contacts(session.available_contacts(), &args.contacts, args.contact_type)?;
    for contact in &chosen {
        session.toggle_contact(contact)?;
    }
    session.confirm_contacts()?;

    // Arrangement
    let arrangement = pick_one(
        args.arrangement.as_deref(),
        session.available_arrangements(),
        |a| a.arrangement.as_str(),
        "arrangement",
        "--arrangement",
    )
    .map_err(|e| {
        e.wrap_err(format!(
            "{} contact(s) of size {}",
            args.conductors, contact_size
        ))
    })?;
    session.select_arrangement(&arrangement)?;

    // Shell style
    let shell_style = shell_style.ok_or_else(|| {
        miette::miette!(
            help = format!("Known styles: {}", known_shell_styles()),
            "No shell style given. Use --shell-style or set `shell_style` in config"
        )
    })?;
    if shell_style_label(shell_style).is_none() {
        debug!(shell_style, "shell style is not in the known list");
    }
    session.select_shell_style(shell_style)?;

    finish(session)
}

/// Resolve one value from a candidate list
///
/// An explicit value is passed through unchecked; otherwise a single
/// candidate is taken automatically.
fn pick_one<T>(
    explicit: Option<&str>,
    candidates: &[T],
    key: impl Fn(&T) -> &str,
    what: &str,
    flag: &str,
) -> Result<String> {
    if let Some(value) = explicit {
        return Ok(value.trim().to_string());
    }
    match candidates {
        [] => Err(miette::miette!("No compatible {} found in catalog", what)),
        [only] => {
            debug!(value = key(only), "{} chosen automatically", what);
            Ok(key(only).to_string())
        }
        many => {
            let mut options: Vec<&str> = many.iter().map(&key).collect();
            options.dedup();
            Err(miette::miette!(
                help = format!("Pass one with {}", flag),
                "Several {}s match: {}",
                what,
                options.join(", ")
            ))
        }
    }
}

fn choose_contacts(
    available: &[Contact],
    requested: &[String],
    contact_type: Option<ContactType>,
) -> Result<Vec<Contact>> {
    let matches_type = |c: &&Contact| contact_type.map_or(true, |t| c.contact_type == t);

    if requested.is_empty() {
        let candidates: Vec<&Contact> = available.iter().filter(matches_type).collect();
        return match candidates.as_slice() {
            [] => Err(miette::miette!("No contacts of this size in catalog")),
            [only] => Ok(vec![(*only).clone()]),
            many => Err(miette::miette!(
                help = "Pass one or more with --contact (and --contact-type if needed)",
                "Several contacts match: {}",
                many.iter()
                    .map(|c| format!("{} ({})", c.part_number, c.contact_type))
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        };
    }

    // Repeating a part number selects it once
    let mut seen = HashSet::new();
    requested
        .iter()
        .map(|pn| pn.trim())
        .filter(|pn| seen.insert(*pn))
        .map(|pn| {
            let found: Vec<&Contact> = available
                .iter()
                .filter(|c| c.part_number == pn)
                .filter(matches_type)
                .collect();
            match found.as_slice() {
                [] => Err(miette::miette!(
                    "Contact '{}' is not available for this contact size",
                    pn
                )),
                [only] => Ok((*only).clone()),
                _ => Err(miette::miette!(
                    help = "Use --contact-type pin or --contact-type socket",
                    "Contact '{}' exists as both pin and socket",
                    pn
                )),
            }
        })
        .collect()
}

/// First part number that occurs more than once among `contacts`
///
/// The session selects contacts by part number, so a pin and a socket with
/// the same number cannot both be selected.
fn repeated_part_number<'a>(contacts: impl IntoIterator<Item = &'a Contact>) -> Option<&'a str> {
    let mut seen = HashSet::new();
    contacts
        .into_iter()
        .map(|c| c.part_number.as_str())
        .find(|pn| !seen.insert(*pn))
}

fn finish(session: &mut BuilderSession) -> Result<BuilderResult> {
    session
        .build_part()
        .cloned()
        .ok_or_else(|| miette::miette!("Selection is incomplete; no part number produced"))
}

fn known_shell_styles() -> String {
    SHELL_STYLES
        .iter()
        .map(|s| format!("{} ({})", s.code, s.label))
        .collect::<Vec<_>>()
        .join(", ")
}

fn run_wizard(
    catalog: &Catalog,
    session: &mut BuilderSession,
    default_system: WireSystem,
    default_shell: Option<&str>,
) -> Result<BuilderResult> {
    let theme = ColorfulTheme::default();

    println!("{} Series 80 connector builder", style("→").blue());
    println!();

    loop {
        // Wire
        let systems = [WireSystem::Awg, WireSystem::Mm2];
        let labels: Vec<&str> = systems.iter().map(|s| s.label()).collect();
        let default_idx = systems.iter().position(|s| *s == default_system).unwrap_or(0);
        let system = systems[Select::with_theme(&theme)
            .with_prompt("Wire system")
            .items(&labels)
            .default(default_idx)
            .interact()
            .into_diagnostic()?];

        let wire: String = Input::with_theme(&theme)
            .with_prompt(format!("Wire size ({})", system.label()))
            .validate_with(|input: &String| -> Result<(), String> {
                match parse_value(input.as_str()) {
                    Some(_) => Ok(()),
                    None => Err(format!("'{}' is not a wire size", input)),
                }
            })
            .interact_text()
            .into_diagnostic()?;

        let conductors: u32 = Input::with_theme(&theme)
            .with_prompt("Number of conductors")
            .default(1)
            .validate_with(|n: &u32| -> Result<(), &str> {
                if *n == 0 {
                    Err("At least one conductor is required")
                } else {
                    Ok(())
                }
            })
            .interact_text()
            .into_diagnostic()?;

        let sizes = session.commit_wire(catalog, system, &wire, conductors)?.to_vec();
        if sizes.is_empty() {
            println!(
                "{} No contact sizes accept {} {}; start again",
                style("!").yellow(),
                wire,
                system.label()
            );
            session.reset();
            continue;
        }

        // Contact size
        let size_idx = Select::with_theme(&theme)
            .with_prompt("Contact size")
            .items(&sizes)
            .default(0)
            .interact()
            .into_diagnostic()?;
        session.select_contact_size(catalog, &sizes[size_idx])?;

        if session.available_contacts().is_empty() || session.available_arrangements().is_empty() {
            println!(
                "{} No {} for {} contact(s) of size {}; start again",
                style("!").yellow(),
                if session.available_contacts().is_empty() {
                    "contacts"
                } else {
                    "arrangements"
                },
                conductors,
                sizes[size_idx]
            );
            session.reset();
            continue;
        }

        // Contacts
        let contacts = session.available_contacts().to_vec();
        let contact_labels: Vec<String> = contacts.iter().map(contact_label).collect();
        let picked = loop {
            let picked = MultiSelect::with_theme(&theme)
                .with_prompt("Contacts (space to toggle, enter to confirm)")
                .items(&contact_labels)
                .interact()
                .into_diagnostic()?;
            if picked.is_empty() {
                println!("{} Select at least one contact", style("!").yellow());
                continue;
            }
            if let Some(pn) = repeated_part_number(picked.iter().map(|&idx| &contacts[idx])) {
                println!(
                    "{} Pick {} as either pin or socket, not both",
                    style("!").yellow(),
                    pn
                );
                continue;
            }
            break picked;
        };
        for idx in picked {
            session.toggle_contact(&contacts[idx])?;
        }
        session.confirm_contacts()?;

        // Arrangement
        let arrangements: Vec<String> = session
            .available_arrangements()
            .iter()
            .map(|a| a.arrangement.clone())
            .collect();
        let arr_idx = Select::with_theme(&theme)
            .with_prompt("Arrangement")
            .items(&arrangements)
            .default(0)
            .interact()
            .into_diagnostic()?;
        session.select_arrangement(&arrangements[arr_idx])?;

        // Shell style
        let mut shell_labels: Vec<String> = SHELL_STYLES
            .iter()
            .map(|s| format!("{} - {}", s.code, s.label))
            .collect();
        shell_labels.push("Other...".to_string());
        let default_shell_idx = default_shell
            .and_then(|code| SHELL_STYLES.iter().position(|s| s.code == code))
            .unwrap_or(0);
        let shell_idx = Select::with_theme(&theme)
            .with_prompt("Shell style")
            .items(&shell_labels)
            .default(default_shell_idx)
            .interact()
            .into_diagnostic()?;
        let shell = match SHELL_STYLES.get(shell_idx) {
            Some(known) => known.code.to_string(),
            None => Input::with_theme(&theme)
                .with_prompt("Shell style code")
                .interact_text()
                .into_diagnostic()?,
        };
        session.select_shell_style(&shell)?;

        return finish(session);
    }
}

fn contact_label(c: &Contact) -> String {
    let mut label = format!("{} ({})", c.part_number, c.contact_type);
    if let Some(range) = c.awg_range.as_deref().filter(|r| !r.is_empty()) {
        label.push_str(&format!("  AWG {}", range));
    }
    if let Some(desc) = c.description.as_deref().filter(|d| !d.is_empty()) {
        label.push_str(&format!("  {}", desc));
    }
    label
}

fn print_result(result: &BuilderResult, format: OutputFormat, quiet: bool) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(result).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(result).into_diagnostic()?);
        }
        OutputFormat::Id => println!("{}", result.part_number),
        OutputFormat::Tsv => println!("{}\t{}", result.part_number, result.description),
        OutputFormat::Csv => println!(
            "{},{}",
            escape_csv(&result.part_number),
            escape_csv(&result.description)
        ),
        OutputFormat::Auto | OutputFormat::Md => {
            if quiet {
                println!("{}", result.part_number);
                return Ok(());
            }
            println!(
                "{} {}",
                style("✓").green(),
                style(&result.part_number).cyan().bold()
            );
            println!("  {}", result.description);
            let meta = &result.metadata;
            println!(
                "  Wire: {} {}   Contact: {}",
                meta.wire_size,
                meta.wire_system.label(),
                meta.contact_pn
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn available() -> Vec<Contact> {
        vec![
            Contact::new("10-375-20", ContactType::Pin, "20"),
            Contact::new("10-375-20", ContactType::Socket, "20"),
            Contact::new("10-376-20", ContactType::Socket, "20"),
        ]
    }

    #[test]
    fn test_repeated_contact_flag_selected_once() {
        let requested = vec!["10-376-20".to_string(), " 10-376-20 ".to_string()];
        let chosen = choose_contacts(&available(), &requested, None).unwrap();
        assert_eq!(chosen.len(), 1);
        assert_eq!(chosen[0].part_number, "10-376-20");
    }

    #[test]
    fn test_pin_and_socket_pick_detected() {
        let contacts = available();
        assert_eq!(
            repeated_part_number([&contacts[0], &contacts[1]]),
            Some("10-375-20")
        );
        assert_eq!(repeated_part_number([&contacts[0], &contacts[2]]), None);
    }

    #[test]
    fn test_ambiguous_part_number_needs_type() {
        let requested = vec!["10-375-20".to_string()];
        assert!(choose_contacts(&available(), &requested, None).is_err());
        let chosen =
            choose_contacts(&available(), &requested, Some(ContactType::Socket)).unwrap();
        assert_eq!(chosen[0].contact_type, ContactType::Socket);
    }
}
