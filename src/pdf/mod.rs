pub mod document;
#[cfg(test)]
pub mod fixtures;
pub mod outline;
pub mod text;

pub use document::SourceDocument;

/// Decode a PDF text string (UTF-16BE with BOM, otherwise PDFDocEncoding
/// approximated as Latin-1) and collapse runs of whitespace.
pub fn decode_text_string(bytes: &[u8]) -> String {
    let raw = if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        bytes.iter().map(|&b| b as char).collect()
    };

    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
