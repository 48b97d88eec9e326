use crate::cli::commands::open_db;
use crate::cli::parser::CategoryAction;
use crate::config::Config;
use crate::core::category::CategoryLogic;
use crate::core::task::TaskLogic;
use crate::errors::AppResult;
use crate::models::category::Category;
use crate::ui::messages::{header, info, success};
use crate::utils::formatting::yes_no;
use crate::utils::table::{Column, Table};

fn categories_table(categories: &[Category]) -> Table {
    let mut table = Table::new(vec![
        Column::right("ID"),
        Column::left("Name"),
        Column::left("Description"),
    ]);
    for c in categories {
        table.add_row(vec![
            c.id.to_string(),
            c.name.clone(),
            c.description.clone().unwrap_or_default(),
        ]);
    }
    table
}

pub fn handle(action: &CategoryAction, cfg: &Config) -> AppResult<()> {
    let mut pool = open_db(cfg)?;

    match action {
        CategoryAction::Add { name, description } => {
            let c = CategoryLogic::create(&mut pool, name, description.as_deref())?;
            success(format!("Category #{} '{}' created.", c.id, c.name));
        }

        CategoryAction::List => {
            let categories = CategoryLogic::list(&pool)?;
            if categories.is_empty() {
                info("No categories yet.");
            } else {
                header("Categories");
                print!("{}", categories_table(&categories).render());
            }
        }

        CategoryAction::Show { id } => {
            let c = CategoryLogic::read(&pool, *id)?;
            header(format!("Category #{} {}", c.id, c.name));
            if let Some(d) = &c.description {
                println!("{d}\n");
            }

            let mut table = Table::new(vec![
                Column::right("ID"),
                Column::left("Task"),
                Column::left("Archived"),
                Column::left("Running"),
            ]);
            for t in TaskLogic::list(&pool, None)?
                .into_iter()
                .filter(|t| t.category_id == c.id)
            {
                table.add_row(vec![
                    t.id.to_string(),
                    t.name,
                    yes_no(t.is_archived).into(),
                    yes_no(t.is_current).into(),
                ]);
            }
            if table.is_empty() {
                info("No tasks in this category.");
            } else {
                print!("{}", table.render());
            }
        }

        CategoryAction::Edit {
            id,
            name,
            description,
            clear_description,
        } => {
            let description = if *clear_description {
                Some(None)
            } else {
                description.as_deref().map(Some)
            };
            let c = CategoryLogic::update(&mut pool, *id, name.as_deref(), description)?;
            success(format!("Category #{} updated: '{}'.", c.id, c.name));
        }

        CategoryAction::Del { id } => {
            CategoryLogic::delete(&mut pool, *id)?;
            success(format!("Category #{id} deleted with its tasks and work."));
        }
    }

    Ok(())
}
