use anyhow::{anyhow, Result};
use qrcode::{render::svg, QrCode};
use solana_sdk::pubkey::Pubkey;

// Generate QR code for a link or address
pub fn generate_qr_code(data: &str) -> Result<Vec<u8>> {
    // Create QR code with medium error correction, links get long
    let code = QrCode::with_error_correction_level(data, qrcode::EcLevel::M)
        .map_err(|e| anyhow!("Failed to generate QR code: {}", e))?;

    let svg_string = code
        .render()
        .min_dimensions(256, 256)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build();

    Ok(svg_string.into_bytes())
}

// Shorten address for display
pub fn shorten_address(address: &Pubkey) -> String {
    let address = address.to_string();
    if address.len() <= 10 {
        return address;
    }

    format!("{}...{}", &address[..5], &address[address.len() - 5..])
}

/// First 8 and last 8 characters of a transaction signature
pub fn truncate_signature(signature: &str) -> String {
    let chars: Vec<char> = signature.chars().collect();
    if chars.len() <= 16 {
        return signature.to_string();
    }

    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 8..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Block explorer the result links point to
#[derive(Debug, Clone)]
pub struct Explorer {
    pub url: String,
    pub cluster: String,
}

impl Explorer {
    pub fn new(url: impl Into<String>, cluster: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            cluster: cluster.into(),
        }
    }

    pub fn transaction_url(&self, signature: &str) -> String {
        format!(
            "{}/tx/{}?cluster={}",
            self.url.trim_end_matches('/'),
            signature,
            self.cluster
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIGNATURE: &str =
        "5VERv8NMvzbJMEkV8xnrLkEaWRtSz9CosKDYjCJjBRnbJLgp8uirBgmQpjKhoR4tjF3ZpRzrFmBV6UjKdiSZkQUW";

    #[test]
    fn signatures_keep_eight_characters_on_each_side() {
        assert_eq!(truncate_signature(SIGNATURE), "5VERv8NM...diSZkQUW");
        assert_eq!(truncate_signature("short"), "short");
    }

    #[test]
    fn explorer_link_includes_cluster() {
        let explorer = Explorer::new("https://explorer.solana.com/", "devnet");
        assert_eq!(
            explorer.transaction_url(SIGNATURE),
            format!("https://explorer.solana.com/tx/{}?cluster=devnet", SIGNATURE)
        );
    }

    #[test]
    fn qr_code_is_svg() {
        let svg = generate_qr_code("https://jup.ag/swap?inputMint=A&outputMint=B&amount=5").unwrap();
        assert!(String::from_utf8(svg).unwrap().contains("<svg"));
    }
}
