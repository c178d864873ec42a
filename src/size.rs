/// Package-size strings look like "6-12.0 Oz. Cans": a container count,
/// a `-`, then a per-container volume in ounces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedSize {
    pub quantity: u32,
    pub container_ounces: f64,
}

/// Split on the first `-`, keep digits on the left and digits plus `.` on
/// the right. A string without a separator, or a side with nothing left
/// after filtering, parses to zero. Never an error.
pub fn parse_size(description: &str) -> ParsedSize {
    let Some((quantity_part, ounces_part)) = description.split_once('-') else {
        return ParsedSize { quantity: 0, container_ounces: 0.0 };
    };

    let quantity_text: String = quantity_part
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    let ounces_text: String = ounces_part
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    ParsedSize {
        quantity: quantity_text.parse().unwrap_or(0),
        container_ounces: ounces_text.parse().unwrap_or(0.0),
    }
}
