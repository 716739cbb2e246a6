//! Session commands: login, logout, whoami.

use super::{CliError, Context};

pub async fn login(ctx: &Context, email: &str, password: &str) -> Result<(), CliError> {
    let user = ctx.client.login(email, password).await?;
    println!("logged in as {} <{}>", user.username, user.email);
    if user.is_admin() {
        println!("administrator account");
    }
    Ok(())
}

pub fn logout(ctx: &Context) {
    ctx.client.logout();
    println!("logged out");
}

pub fn whoami(ctx: &Context) {
    match ctx.client.session().user() {
        Some(user) => {
            let role = if user.is_admin() { "admin" } else { "customer" };
            println!("{} <{}> ({role})", user.username, user.email);
        }
        None => println!("not logged in"),
    }
}
