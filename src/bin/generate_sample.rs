use anyhow::{Context, Result};
use serde::Serialize;

/// One listing in the layout of `cleaned_vehicles_us.csv`.
#[derive(Debug, Serialize)]
struct Listing {
    price: u32,
    model_year: Option<u16>,
    model: String,
    condition: &'static str,
    cylinders: Option<u8>,
    fuel: &'static str,
    odometer: Option<f64>,
    transmission: &'static str,
    #[serde(rename = "type")]
    vehicle_type: &'static str,
    paint_color: Option<&'static str>,
    is_4wd: bool,
    date_posted: String,
    days_listed: u16,
    manufacturer: &'static str,
}

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// Manufacturer, models with (type, base price, cylinders).
type Catalogue = [(&'static str, &'static [(&'static str, &'static str, f64, u8)])];

const CATALOGUE: &Catalogue = &[
    (
        "toyota",
        &[
            ("camry", "sedan", 14_000.0, 4),
            ("rav4", "SUV", 17_000.0, 4),
            ("tacoma", "pickup", 22_000.0, 6),
        ],
    ),
    (
        "ford",
        &[
            ("f-150", "truck", 21_000.0, 8),
            ("focus", "sedan", 7_500.0, 4),
            ("explorer", "SUV", 15_000.0, 6),
        ],
    ),
    (
        "chevrolet",
        &[
            ("silverado", "truck", 23_000.0, 8),
            ("malibu", "sedan", 9_000.0, 4),
            ("equinox", "SUV", 12_000.0, 4),
        ],
    ),
    (
        "honda",
        &[
            ("civic", "sedan", 10_000.0, 4),
            ("cr-v", "SUV", 15_500.0, 4),
            ("odyssey", "mini-van", 13_000.0, 6),
        ],
    ),
    (
        "nissan",
        &[
            ("altima", "sedan", 8_500.0, 4),
            ("rogue", "SUV", 12_500.0, 4),
            ("frontier", "pickup", 16_000.0, 6),
        ],
    ),
    (
        "bmw",
        &[
            ("x5", "SUV", 19_000.0, 6),
            ("328i", "sedan", 12_000.0, 6),
        ],
    ),
    (
        "jeep",
        &[
            ("wrangler", "SUV", 24_000.0, 6),
            ("grand cherokee", "SUV", 18_000.0, 6),
        ],
    ),
    (
        "ram",
        &[
            ("1500", "truck", 25_000.0, 8),
            ("2500", "truck", 32_000.0, 8),
        ],
    ),
];

const CONDITIONS: [&str; 5] = ["excellent", "good", "like new", "fair", "new"];
const COLORS: [&str; 6] = ["white", "black", "silver", "grey", "blue", "red"];

fn generate(rng: &mut SimpleRng, count: usize) -> Vec<Listing> {
    (0..count)
        .map(|_| {
            let (manufacturer, models) = *rng.pick(CATALOGUE);
            let &(model, vehicle_type, base_price, cylinders) = rng.pick(models);

            let age = rng.gauss(8.0, 4.0).clamp(0.0, 30.0).round() as u16;
            let model_year = 2019 - age;
            let odometer = (age as f64 * rng.gauss(12_000.0, 3_000.0)).max(0.0).round();
            let depreciation = 0.88f64.powi(age as i32);
            let price = (base_price * depreciation * rng.gauss(1.0, 0.15))
                .max(500.0)
                .round() as u32;
            let is_4wd = matches!(vehicle_type, "truck" | "pickup" | "SUV") && rng.chance(0.7);

            let day = 1 + rng.next_u64() % 28;
            let month = 5 + rng.next_u64() % 12;
            let (year, month) = if month > 12 {
                (2019, month - 12)
            } else {
                (2018, month)
            };

            Listing {
                price,
                model_year: (!rng.chance(0.05)).then_some(model_year),
                model: format!("{manufacturer} {model}"),
                condition: *rng.pick(&CONDITIONS),
                cylinders: (!rng.chance(0.08)).then_some(cylinders),
                fuel: if cylinders >= 8 && rng.chance(0.2) { "diesel" } else { "gas" },
                odometer: (!rng.chance(0.1)).then_some(odometer),
                transmission: if rng.chance(0.9) { "automatic" } else { "manual" },
                vehicle_type,
                paint_color: (!rng.chance(0.15)).then(|| *rng.pick(&COLORS)),
                is_4wd,
                date_posted: format!("{year}-{month:02}-{day:02}"),
                days_listed: (rng.gauss(40.0, 25.0).abs()).round() as u16,
                manufacturer,
            }
        })
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();

    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "cleaned_vehicles_us.csv".to_string());

    let mut rng = SimpleRng::new(42);
    let listings = generate(&mut rng, 2_000);

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    for listing in &listings {
        writer.serialize(listing).context("writing listing")?;
    }
    writer.flush().context("flushing CSV writer")?;

    log::info!("Wrote {} listings to {output_path}", listings.len());
    println!("Wrote {} listings to {output_path}", listings.len());
    Ok(())
}
