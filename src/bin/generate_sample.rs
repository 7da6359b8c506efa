use serde::Serialize;

/// Same header layout the dashboard loads.
#[derive(Serialize)]
struct Record<'a> {
    #[serde(rename = "Country")]
    country: &'a str,
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Status")]
    status: &'a str,
    #[serde(rename = "Life expectancy (men)")]
    life_men: f64,
    #[serde(rename = "Life expectancy(women)")]
    life_women: f64,
    #[serde(rename = "Infant deaths")]
    infant_deaths: f64,
    #[serde(rename = "Alcohol")]
    alcohol: Option<f64>,
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

    /// Uniform in `[-spread, spread]`.
    fn jitter(&mut self, spread: f64) -> f64 {
        (self.next_f64() * 2.0 - 1.0) * spread
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn main() {
    let mut rng = SimpleRng::new(42);

    // (country, status, life men 2000, life women 2000, infant deaths 2000, alcohol 2000)
    let countries: [(&str, &str, f64, f64, f64, f64); 10] = [
        ("Russian Federation", "Developing", 59.0, 72.3, 22.0, 10.6),
        ("Germany", "Developed", 75.1, 81.0, 3.0, 12.9),
        ("France", "Developed", 75.3, 82.8, 3.0, 13.6),
        ("Brazil", "Developing", 66.4, 74.0, 60.0, 7.2),
        ("India", "Developing", 61.9, 63.6, 1600.0, 1.5),
        ("Japan", "Developed", 77.7, 84.6, 3.0, 7.5),
        ("Nigeria", "Developing", 45.8, 47.2, 520.0, 8.6),
        ("Chad", "Developing", 46.1, 49.0, 42.0, 0.6),
        ("Canada", "Developed", 76.6, 81.7, 2.0, 8.1),
        ("Kazakhstan", "Developing", 58.4, 69.5, 9.0, 4.8),
    ];

    let output_path = "Life.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");

    let mut rows = 0usize;
    for &(country, status, men, women, infants, alcohol) in &countries {
        for (step, year) in (2000..=2015).enumerate() {
            let t = step as f64;
            // Every seventh cell is left blank, like the real survey data.
            let alcohol_cell = if (rows + 3) % 7 == 0 {
                None
            } else {
                Some(round1((alcohol - 0.05 * t + rng.jitter(0.4)).max(0.0)))
            };
            let record = Record {
                country,
                year,
                status,
                life_men: round1(men + 0.35 * t + rng.jitter(0.5)),
                life_women: round1(women + 0.25 * t + rng.jitter(0.5)),
                infant_deaths: (infants * (1.0 - 0.03 * t) + rng.jitter(infants * 0.05)).max(0.0).round(),
                alcohol: alcohol_cell,
            };
            writer.serialize(&record).expect("Failed to write record");
            rows += 1;
        }
    }
    writer.flush().expect("Failed to flush output");

    println!("Wrote {rows} rows ({} countries, 2000–2015) to {output_path}", countries.len());
}
