use bevy::math::Vec3;

#[derive(Debug)]
pub enum ErrorType {
    ComponentCount(String),
    InvalidNumber(String),
    OutOfRange(String),
}

#[derive(Debug)]
pub struct CliError(pub ErrorType);

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match &self.0 {
            ErrorType::ComponentCount(msg) => {
                format!("Expected three comma-separated components. {}", msg)
            }
            ErrorType::InvalidNumber(msg) => format!("Invalid number. {}", msg),
            ErrorType::OutOfRange(msg) => format!("Value out of range. {}", msg),
        };
        write!(f, "{}", msg)
    }
}

impl std::error::Error for CliError {}

pub type Result<T> = std::result::Result<T, CliError>;

/// Parse a finite number, naming the argument in the error.
pub fn parse_finite(name: &str, text: &str) -> Result<f32> {
    let value = text
        .trim()
        .parse::<f32>()
        .map_err(|e| CliError(ErrorType::InvalidNumber(format!("{}: '{}' ({})", name, text, e))))?;

    if !value.is_finite() {
        return Err(CliError(ErrorType::InvalidNumber(format!(
            "{}: '{}' is not finite",
            name, text
        ))));
    }

    Ok(value)
}

/// Parse `x,y,z` into a vector.
pub fn parse_vec3(text: &str) -> Result<Vec3> {
    let parts: Vec<&str> = text.split(',').collect();
    if parts.len() != 3 {
        return Err(CliError(ErrorType::ComponentCount(format!(
            "Got {} in '{}'",
            parts.len(),
            text
        ))));
    }

    Ok(Vec3::new(
        parse_finite("x", parts[0])?,
        parse_finite("y", parts[1])?,
        parse_finite("z", parts[2])?,
    ))
}

/// Reject non-positive time steps and similar.
pub fn require_positive(name: &str, value: f32) -> Result<f32> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(CliError(ErrorType::OutOfRange(format!(
            "{} must be positive, got {}",
            name, value
        ))))
    }
}
