//! User command handlers.

use tabled::Tabled;

use movesys_core::{Console, EntityId, User, UserStatus};

use crate::cli::{GlobalOpts, UsersArgs, UsersCommand};
use crate::error::CliError;
use crate::output::{self, or_dash};

use super::crud::{self, View, parse};

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "DNI")]
    dni: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn row(u: &User) -> UserRow {
    UserRow {
        id: crud::id_of(u),
        name: or_dash(&u.full_name()),
        dni: or_dash(&u.dni),
        phone: or_dash(&u.phone_number),
        role: u.role.clone(),
        status: u.status.to_string(),
    }
}

fn detail(u: &User) -> String {
    [
        format!("ID:     {}", crud::id_of(u)),
        format!("Name:   {}", or_dash(&u.full_name())),
        format!("DNI:    {}", or_dash(&u.dni)),
        format!("Phone:  {}", or_dash(&u.phone_number)),
        format!("Role:   {}", u.role),
        format!("Status: {}", u.status),
    ]
    .join("\n")
}

const VIEW: View<User, UserRow> = View {
    list_command: "users list",
    row,
    detail,
};

pub async fn handle(console: &Console, args: UsersArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let store = console.users();
    match args.command {
        UsersCommand::Common(command) => crud::handle(store, command, global, &VIEW).await,

        UsersCommand::ByRole { role } => {
            store.fetch_by_role(role.trim()).await?;
            crud::print_list(store, global, &VIEW)
        }

        UsersCommand::Active => {
            store.fetch_active().await?;
            crud::print_list(store, global, &VIEW)
        }

        UsersCommand::Status { id, status } => {
            let status: UserStatus = parse("status", &status)?;
            let user = store
                .update_status(&EntityId::from(id.as_str()), status)
                .await?;
            let out = output::render_single(global.format(), user.as_ref(), detail, crud::id_of)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
