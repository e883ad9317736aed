use quintel_core::predict;

pub fn run(value: f64) -> Result<(), String> {
    let predicted = predict(value).map_err(|e| e.to_string())?;
    println!("{predicted}");
    Ok(())
}
