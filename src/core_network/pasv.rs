use crate::core_error::{FtpClientError, FtpResult};

/// Extracts the data endpoint from a 227 reply.
///
/// The six comma-separated integers inside the first parenthesised group
/// are `h1,h2,h3,h4,p1,p2`. The host is `h1.h2.h3.h4` and the port is
/// `p1 * 256 + p2`.
pub fn parse_pasv_reply(text: &str) -> FtpResult<(String, u16)> {
    let malformed = || FtpClientError::BadResponse(format!("Malformed PASV reply: {}", text));

    let open = text.find('(').ok_or_else(malformed)?;
    let close = text[open..].find(')').ok_or_else(malformed)? + open;

    let numbers: Vec<u8> = text[open + 1..close]
        .split(',')
        .map(|part| part.trim().parse::<u8>())
        .collect::<Result<_, _>>()
        .map_err(|_| malformed())?;

    if numbers.len() != 6 {
        return Err(malformed());
    }

    let host = format!(
        "{}.{}.{}.{}",
        numbers[0], numbers[1], numbers[2], numbers[3]
    );
    let port = u16::from(numbers[4]) * 256 + u16::from(numbers[5]);
    Ok((host, port))
}
