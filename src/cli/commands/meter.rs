use crate::cli::parser::{Commands, MeterCommands};
use crate::config::Config;
use crate::core::meter::{
    AddPositionLogic, MeterForm, MeterPatch, SaveMeterLogic, parse_category, readings_with_delta,
};
use crate::db::meters::{load_all_meters, load_meter};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::meter::Meter;
use crate::ui::messages::{header, info, success};
use crate::utils::colors::{GREY, RESET, color_for_category, color_for_delta, colorize_optional};
use crate::utils::date::parse_datetime;
use crate::utils::formatting::format_reading;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Meter { action } = cmd {
        let mut pool = DbPool::open_initialized(&cfg.database)?;

        match action {
            MeterCommands::Add {
                name,
                category,
                number,
                note,
                deactivated,
            } => {
                let form = MeterForm {
                    name: name.clone(),
                    category: parse_category(category.as_ref())?,
                    number: number.clone().unwrap_or_default(),
                    note: note.clone().unwrap_or_default(),
                    is_deactivated: *deactivated,
                };

                let meter = SaveMeterLogic::create(&mut pool, &form)?;
                success(format!(
                    "Meter #{} '{}' ({}) saved.",
                    meter.id, meter.name, meter.category
                ));
            }

            MeterCommands::Edit {
                id,
                name,
                category,
                number,
                note,
                deactivated,
                active,
            } => {
                let patch = MeterPatch {
                    name: name.clone(),
                    category: match category {
                        Some(_) => Some(parse_category(category.as_ref())?),
                        None => None,
                    },
                    number: number.clone(),
                    note: note.clone(),
                    is_deactivated: if *deactivated {
                        Some(true)
                    } else if *active {
                        Some(false)
                    } else {
                        None
                    },
                };

                if patch.is_empty() {
                    info("Nothing to change.");
                    return Ok(());
                }

                let meter = SaveMeterLogic::update(&mut pool, *id, &patch)?;
                success(format!("Meter #{} '{}' updated.", meter.id, meter.name));
            }

            MeterCommands::List { active } => {
                let meters: Vec<Meter> = load_all_meters(&pool.conn)?
                    .into_iter()
                    .filter(|m| !*active || !m.is_deactivated)
                    .collect();

                if meters.is_empty() {
                    info("No meters found.");
                    return Ok(());
                }

                print_meter_list(&meters);
            }

            MeterCommands::Show { id } => {
                let meter = load_meter(&pool.conn, *id)?.ok_or(AppError::MeterNotFound(*id))?;
                print_meter_detail(&meter);
            }

            MeterCommands::Reading { id, value, at } => {
                let at = match at {
                    Some(raw) => Some(
                        parse_datetime(raw).ok_or_else(|| AppError::InvalidDate(raw.clone()))?,
                    ),
                    None => None,
                };

                let position = AddPositionLogic::apply(&mut pool, *id, value, at)?;
                success(format!(
                    "Reading #{} = {} recorded for meter #{} at {}",
                    position.id,
                    format_reading(position.value),
                    id,
                    position.added_at.format("%Y-%m-%d %H:%M")
                ));
            }
        }
    }

    Ok(())
}

fn print_meter_list(meters: &[Meter]) {
    let mut table = Table::new(vec![
        Column::new("ID", 6),
        Column::new("NAME", 28),
        Column::new("CATEGORY", 12),
        Column::new("NUMBER", 16),
        Column::new("LAST READING", 28),
        Column::new("STATUS", 11),
    ]);

    for m in meters {
        let last = m
            .latest_position()
            .map(|p| {
                format!(
                    "{} {} ({})",
                    format_reading(p.value),
                    m.category.unit(),
                    p.added_at.format("%Y-%m-%d")
                )
            })
            .unwrap_or_default();

        table.add_row(vec![
            m.id.to_string(),
            m.name.clone(),
            m.category.to_string(),
            m.number.clone(),
            last.replace("  ", " "),
            if m.is_deactivated {
                "deactivated".to_string()
            } else {
                "active".to_string()
            },
        ]);
    }

    print!("{}", table.render());
}

fn print_meter_detail(m: &Meter) {
    let color = color_for_category(m.category);

    header(format!("Meter #{} {}", m.id, m.name));
    println!("Category : {}{}{}", color, m.category, RESET);
    println!("Number   : {}", colorize_optional(&m.number));
    println!("Note     : {}", colorize_optional(&m.note));
    if m.is_deactivated {
        println!("Status   : {}deactivated{}", GREY, RESET);
    } else {
        println!("Status   : active");
    }
    println!();

    if m.positions.is_empty() {
        info("No readings yet.");
        return;
    }

    let unit = m.category.unit();
    println!("{:>4}  {:<16}  {:>14}  {:>12}", "#", "DATE", "VALUE", "DELTA");

    for (p, delta) in readings_with_delta(m) {
        let delta_str = match delta {
            Some(d) => format!(
                "{}{}{}",
                color_for_delta(d),
                format!("{:+.3}", d)
                    .trim_end_matches('0')
                    .trim_end_matches('.'),
                RESET
            ),
            None => format!("{GREY}--{RESET}"),
        };

        println!(
            "{:>4}  {:<16}  {:>14}  {:>12}",
            p.id,
            p.added_at.format("%Y-%m-%d %H:%M").to_string(),
            format!("{} {}", format_reading(p.value), unit).trim_end(),
            delta_str
        );
    }
}
