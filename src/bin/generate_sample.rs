use anyhow::{Context, Result};

/// (sublocality text, centre latitude, centre longitude, typical price)
const AREAS: [(&str, f64, f64, f64); 9] = [
    ("Manhattan", 40.7831, -73.9712, 1_800_000.0),
    ("New York", 40.7580, -73.9855, 1_500_000.0),
    ("Brooklyn", 40.6782, -73.9442, 1_100_000.0),
    ("Kings County", 40.6500, -73.9500, 950_000.0),
    ("Queens", 40.7282, -73.7949, 850_000.0),
    ("Queens County", 40.7000, -73.8200, 800_000.0),
    ("The Bronx", 40.8448, -73.8648, 600_000.0),
    ("Staten Island", 40.5795, -74.1502, 700_000.0),
    ("Richmond County", 40.5800, -74.1400, 650_000.0),
];

const TYPES: [(&str, f64); 8] = [
    ("Co-op for sale", 0.30),
    ("House for sale", 0.22),
    ("Condo for sale", 0.18),
    ("Multi-family home for sale", 0.14),
    ("Townhouse for sale", 0.06),
    ("Pending", 0.05),
    ("Land for sale", 0.03),
    ("Mobile house for sale", 0.02),
];

const BROKERS: [&str; 4] = [
    "Brokered by Douglas Elliman - 575 Madison Ave",
    "Brokered by Corcoran East Side",
    "Brokered by COMPASS",
    "Brokered by Serhant",
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    /// Pick from `(item, weight)` pairs; weights need not sum to one.
    fn weighted<'a>(&mut self, items: &[(&'a str, f64)]) -> &'a str {
        let total: f64 = items.iter().map(|(_, w)| w).sum();
        let mut r = self.next_f64() * total;
        for (item, w) in items {
            if r < *w {
                return *item;
            }
            r -= w;
        }
        items[items.len() - 1].0
    }
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "NY-House-Dataset.csv".to_string());
    let rows: usize = 2000;
    let mut rng = SimpleRng::new(42);

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record([
        "BROKERTITLE",
        "TYPE",
        "PRICE",
        "BEDS",
        "BATH",
        "PROPERTYSQFT",
        "SUBLOCALITY",
        "LATITUDE",
        "LONGITUDE",
    ])?;

    for _ in 0..rows {
        let (area, lat, lon, typical) = AREAS[rng.below(AREAS.len())];
        let kind = rng.weighted(&TYPES);
        let beds = 1 + rng.below(5);
        let baths = 1 + rng.below(beds.min(3));

        // Log-normal-ish prices around the area's typical price.
        let price = (typical * rng.gauss(0.0, 0.6).exp()).round().max(10_000.0);
        let sqft = (400.0 + beds as f64 * 350.0 + rng.gauss(0.0, 150.0)).round();

        // Some listings have no usable sqft, a few have no coordinates.
        let sqft_cell = match rng.below(20) {
            0 => String::new(),
            1 => "0".to_string(),
            _ => format!("{sqft:.0}"),
        };
        let (lat_cell, lon_cell) = if rng.below(100) == 0 {
            (String::new(), String::new())
        } else {
            (
                format!("{:.6}", lat + rng.gauss(0.0, 0.03)),
                format!("{:.6}", lon + rng.gauss(0.0, 0.03)),
            )
        };

        let broker = BROKERS[rng.below(BROKERS.len())];
        let price_cell = format!("{price:.0}");
        let beds_cell = beds.to_string();
        let baths_cell = baths.to_string();
        writer.write_record([
            broker,
            kind,
            price_cell.as_str(),
            beds_cell.as_str(),
            baths_cell.as_str(),
            sqft_cell.as_str(),
            area,
            lat_cell.as_str(),
            lon_cell.as_str(),
        ])?;
    }
    writer.flush().with_context(|| format!("writing {output_path}"))?;

    println!("Wrote {rows} listings to {output_path}");
    Ok(())
}
