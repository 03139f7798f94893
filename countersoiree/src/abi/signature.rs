//! Human readable function interfaces.
//!
//! Interfaces look like `function transfer(address to, uint256 amount) returns (bool)`.
//! Only the part up to the end of the parameter list matters for identifying a function.

const FUNCTION_KEYWORD: &str = "function";

/// Extract the function identifier from an interface.
///
/// `"function foo(uint256) returns (bool)"` gives `"foo"`. The `function` keyword is
/// optional. Returns `None` when no identifier can be found.
pub fn interface_to_function_name(interface: &str) -> Option<&str> {
    let interface = strip_function_keyword(interface);
    let name = match interface.find('(') {
        Some(end) => &interface[..end],
        None => interface,
    }
    .trim();

    (is_identifier(name) && name != FUNCTION_KEYWORD).then_some(name)
}

/// Convert an interface to the canonical signature selectors are hashed from.
///
/// Parameter names and data locations are dropped, `tuple(...)` is written `(...)`
/// and the `uint`/`int` aliases are expanded. Returns `None` when the interface has
/// no well formed parameter list.
pub fn canonical_signature(interface: &str) -> Option<String> {
    let name = interface_to_function_name(interface)?;
    let interface = strip_function_keyword(interface);
    let open = interface.find('(')?;
    let close = matching_paren(interface, open)?;
    let parameters = parameter_list(&interface[open + 1..close])?;
    Some(format!("{name}({})", parameters.join(",")))
}

fn strip_function_keyword(interface: &str) -> &str {
    let interface = interface.trim();
    match interface.strip_prefix(FUNCTION_KEYWORD) {
        Some(rest) if rest.starts_with(char::is_whitespace) => rest.trim_start(),
        _ => interface,
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Index of the parenthesis closing the one at `open`.
fn matching_paren(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (index, c) in text.char_indices().skip_while(|(index, _)| *index < open) {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split a parameter list on its top level commas and canonicalize each parameter.
fn parameter_list(list: &str) -> Option<Vec<String>> {
    if list.trim().is_empty() {
        return Some(Vec::new());
    }

    let mut parameters = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (index, c) in list.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => {
                parameters.push(canonical_type(&list[start..index])?);
                start = index + 1;
            }
            _ => {}
        }
    }
    parameters.push(canonical_type(&list[start..])?);
    Some(parameters)
}

fn canonical_type(parameter: &str) -> Option<String> {
    let parameter = parameter.trim();
    let tuple = parameter
        .strip_prefix("tuple")
        .filter(|rest| rest.starts_with('('))
        .or_else(|| parameter.starts_with('(').then_some(parameter));

    match tuple {
        Some(tuple) => {
            let close = matching_paren(tuple, 0)?;
            let components = parameter_list(&tuple[1..close])?;
            let array_suffix: String = tuple[close + 1..]
                .chars()
                .take_while(|c| !c.is_whitespace())
                .collect();
            Some(format!("({}){array_suffix}", components.join(",")))
        }
        None => {
            let ty = parameter.split_whitespace().next()?;
            let (base, array_suffix) = ty.split_at(ty.find('[').unwrap_or(ty.len()));
            let base = match base {
                "uint" => "uint256",
                "int" => "int256",
                base => base,
            };
            Some(format!("{base}{array_suffix}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULFILL_BASIC_ORDER: &str = "function fulfillBasicOrder(tuple(address,uint256,uint256,address,address,address,uint256,uint256,uint8,uint256,uint256,bytes32,uint256,bytes32,bytes32,uint256,tuple(uint256,address)[],bytes)) payable returns (bool)";

    #[test]
    fn function_names() {
        assert_eq!(
            interface_to_function_name("function foo(uint256) returns (bool)"),
            Some("foo")
        );
        assert_eq!(
            interface_to_function_name(FULFILL_BASIC_ORDER),
            Some("fulfillBasicOrder")
        );
        assert_eq!(
            interface_to_function_name("transfer(address,uint256)"),
            Some("transfer")
        );
        assert_eq!(interface_to_function_name("  totalSupply  "), Some("totalSupply"));
        assert_eq!(interface_to_function_name("functionCall()"), Some("functionCall"));
    }

    #[test]
    fn function_names_of_malformed_interfaces() {
        assert_eq!(interface_to_function_name(""), None);
        assert_eq!(interface_to_function_name("function"), None);
        assert_eq!(interface_to_function_name("function (uint256)"), None);
        assert_eq!(interface_to_function_name("event Transfer(address)"), None);
    }

    #[test]
    fn canonical_signatures() {
        assert_eq!(
            canonical_signature("function transfer(address to, uint256 amount) returns (bool)")
                .as_deref(),
            Some("transfer(address,uint256)")
        );
        assert_eq!(
            canonical_signature("function deposit() payable").as_deref(),
            Some("deposit()")
        );
        assert_eq!(
            canonical_signature("function multicall(bytes[] calldata data, uint deadline)")
                .as_deref(),
            Some("multicall(bytes[],uint256)")
        );
        assert_eq!(
            canonical_signature("swap((address token, int amount)[2] legs)").as_deref(),
            Some("swap((address,int256)[2])")
        );
        assert_eq!(
            canonical_signature(FULFILL_BASIC_ORDER).as_deref(),
            Some(
                "fulfillBasicOrder((address,uint256,uint256,address,address,address,uint256,uint256,uint8,uint256,uint256,bytes32,uint256,bytes32,bytes32,uint256,(uint256,address)[],bytes))"
            )
        );
    }

    #[test]
    fn canonical_signatures_of_malformed_interfaces() {
        assert_eq!(canonical_signature("transfer"), None);
        assert_eq!(canonical_signature("function transfer(address"), None);
        assert_eq!(canonical_signature("function transfer(address,)"), None);
    }
}
