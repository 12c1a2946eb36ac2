use minijinja::Environment;

/// Build the template environment with all pages compiled in.
pub fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template("index.html", include_str!("../templates/index.html"))?;
    env.add_template("viewer.html", include_str!("../templates/viewer.html"))?;
    Ok(env)
}
