use crate::{
    types::TypeSpec,
    validate::{TypeError, ValidationError},
    value::Value,
};

/// CSS named colors, sorted for binary search.
const NAMED_COLORS: &[&str] = &[
    "aliceblue",
    "antiquewhite",
    "aqua",
    "aquamarine",
    "azure",
    "beige",
    "bisque",
    "black",
    "blanchedalmond",
    "blue",
    "blueviolet",
    "brown",
    "burlywood",
    "cadetblue",
    "chartreuse",
    "chocolate",
    "coral",
    "cornflowerblue",
    "cornsilk",
    "crimson",
    "cyan",
    "darkblue",
    "darkcyan",
    "darkgoldenrod",
    "darkgray",
    "darkgreen",
    "darkgrey",
    "darkkhaki",
    "darkmagenta",
    "darkolivegreen",
    "darkorange",
    "darkorchid",
    "darkred",
    "darksalmon",
    "darkseagreen",
    "darkslateblue",
    "darkslategray",
    "darkslategrey",
    "darkturquoise",
    "darkviolet",
    "deeppink",
    "deepskyblue",
    "dimgray",
    "dimgrey",
    "dodgerblue",
    "firebrick",
    "floralwhite",
    "forestgreen",
    "fuchsia",
    "gainsboro",
    "ghostwhite",
    "gold",
    "goldenrod",
    "gray",
    "green",
    "greenyellow",
    "grey",
    "honeydew",
    "hotpink",
    "indianred",
    "indigo",
    "ivory",
    "khaki",
    "lavender",
    "lavenderblush",
    "lawngreen",
    "lemonchiffon",
    "lightblue",
    "lightcoral",
    "lightcyan",
    "lightgoldenrodyellow",
    "lightgray",
    "lightgreen",
    "lightgrey",
    "lightpink",
    "lightsalmon",
    "lightseagreen",
    "lightskyblue",
    "lightslategray",
    "lightslategrey",
    "lightsteelblue",
    "lightyellow",
    "lime",
    "limegreen",
    "linen",
    "magenta",
    "maroon",
    "mediumaquamarine",
    "mediumblue",
    "mediumorchid",
    "mediumpurple",
    "mediumseagreen",
    "mediumslateblue",
    "mediumspringgreen",
    "mediumturquoise",
    "mediumvioletred",
    "midnightblue",
    "mintcream",
    "mistyrose",
    "moccasin",
    "navajowhite",
    "navy",
    "oldlace",
    "olive",
    "olivedrab",
    "orange",
    "orangered",
    "orchid",
    "palegoldenrod",
    "palegreen",
    "paleturquoise",
    "palevioletred",
    "papayawhip",
    "peachpuff",
    "peru",
    "pink",
    "plum",
    "powderblue",
    "purple",
    "rebeccapurple",
    "red",
    "rosybrown",
    "royalblue",
    "saddlebrown",
    "salmon",
    "sandybrown",
    "seagreen",
    "seashell",
    "sienna",
    "silver",
    "skyblue",
    "slateblue",
    "slategray",
    "slategrey",
    "snow",
    "springgreen",
    "steelblue",
    "tan",
    "teal",
    "thistle",
    "tomato",
    "turquoise",
    "violet",
    "wheat",
    "white",
    "whitesmoke",
    "yellow",
    "yellowgreen",
];

#[must_use]
pub fn is_named_color(name: &str) -> bool {
    NAMED_COLORS.binary_search(&name).is_ok()
}

fn is_hex_color(s: &str) -> bool {
    s.strip_prefix('#').is_some_and(|digits| {
        matches!(digits.len(), 3 | 6 | 8) && digits.chars().all(|c| c.is_ascii_hexdigit())
    })
}

// Color names are normalized to lowercase; hex strings and tuples are kept.
pub(super) fn validate(field: &str, spec: &TypeSpec, value: &Value) -> Result<Value, ValidationError> {
    let mismatch = || TypeError::new(field, spec, value);

    match value {
        Value::Text(s) if is_hex_color(s) => Ok(value.clone()),
        Value::Text(s) => {
            let lower = s.to_ascii_lowercase();
            if is_named_color(&lower) {
                Ok(Value::Text(lower))
            } else {
                Err(mismatch()
                    .with_reason(format!("'{s}' is not a named or hex color"))
                    .into())
            }
        }
        Value::Tuple(items) | Value::List(items) => {
            validate_rgba(items).map_err(|reason| mismatch().with_reason(reason))?;

            Ok(Value::Tuple(items.clone()))
        }
        _ => Err(mismatch().into()),
    }
}

fn validate_rgba(items: &[Value]) -> Result<(), String> {
    if !matches!(items.len(), 3 | 4) {
        return Err(format!("expected 3 or 4 components, got {}", items.len()));
    }

    for (i, item) in items.iter().take(3).enumerate() {
        match item {
            Value::Int(c) if (0..=255).contains(c) => {}
            _ => return Err(format!("component {i} must be an integer in [0, 255]")),
        }
    }

    if let Some(alpha) = items.get(3) {
        match alpha.as_f64() {
            Some(a) if (0.0..=1.0).contains(&a) => {}
            _ => return Err("alpha must be a number in [0, 1]".to_string()),
        }
    }

    Ok(())
}
