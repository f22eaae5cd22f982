//! List / get / delete, shared by every domain.

use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use tabled::Tabled;

use movesys_core::{Assembler, CoreError, Entity, EntityId, EntityStore};

use crate::cli::{CrudCommand, GlobalOpts, ListArgs};
use crate::error::CliError;
use crate::output;

/// How one domain's entities are shown.
pub struct View<T, R> {
    pub list_command: &'static str,
    pub row: fn(&T) -> R,
    pub detail: fn(&T) -> String,
}

pub async fn handle<A, R>(
    store: &EntityStore<A>,
    command: CrudCommand,
    global: &GlobalOpts,
    view: &View<A::Entity, R>,
) -> Result<(), CliError>
where
    A: Assembler,
    A::Entity: Serialize,
    R: Tabled,
{
    match command {
        CrudCommand::List(args) => list(store, &args, global, view).await,

        CrudCommand::Get { id } => {
            let entity = fetch(store, &id, view).await?;
            let out = output::render_single(global.format(), entity.as_ref(), view.detail, id_of)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CrudCommand::Delete { id } => {
            store.delete(&EntityId::from(id.as_str())).await?;
            if !global.quiet {
                eprintln!("Deleted {} {id}", <A::Entity as Entity>::KIND);
            }
            Ok(())
        }
    }
}

pub async fn list<A, R>(
    store: &EntityStore<A>,
    args: &ListArgs,
    global: &GlobalOpts,
    view: &View<A::Entity, R>,
) -> Result<(), CliError>
where
    A: Assembler,
    A::Entity: Serialize,
    R: Tabled,
{
    match args.search.as_deref() {
        Some(query) => store.search(query).await?,
        None => store.fetch_all(&[]).await?,
    };
    if let Some(ref status) = args.status {
        store.set_facet("status", status)?;
    }
    print_list(store, global, view)
}

/// Print the store's current filtered view.
pub fn print_list<A, R>(
    store: &EntityStore<A>,
    global: &GlobalOpts,
    view: &View<A::Entity, R>,
) -> Result<(), CliError>
where
    A: Assembler,
    A::Entity: Serialize,
    R: Tabled,
{
    let items = store.filtered();
    let out = output::render_list(
        global.format(),
        &items,
        |entity: &Arc<A::Entity>| (view.row)(entity),
        |entity: &Arc<A::Entity>| id_of(entity.as_ref()),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Load one record, turning a 404 into a friendly not-found error.
pub async fn fetch<A, R>(
    store: &EntityStore<A>,
    id: &str,
    view: &View<A::Entity, R>,
) -> Result<Arc<A::Entity>, CliError>
where
    A: Assembler,
{
    match store.fetch_one(&EntityId::from(id)).await {
        Ok(entity) => Ok(entity),
        Err(CoreError::Api { status: 404, .. }) => Err(CliError::NotFound {
            kind: <A::Entity as Entity>::KIND.into(),
            id: id.into(),
            list_command: view.list_command.into(),
        }),
        Err(err) => Err(err.into()),
    }
}

pub fn id_of<T: Entity>(entity: &T) -> String {
    output::opt(entity.id())
}

/// Parse a command-line value into one of the core's enums.
pub fn parse<T: FromStr>(field: &str, raw: &str) -> Result<T, CliError> {
    raw.trim().parse().map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("unrecognized value '{raw}'"),
    })
}
