//! Fixed-point binary encoding
//!
//! Binary genomes concatenate per-variable bit fields. Each field holds an
//! optional sign bit, `integer_bits` magnitude bits, and `fraction_bits`
//! fractional bits at a scale of `2^-fraction_bits`. Encoding saturates:
//! values beyond the representable range clamp to the extreme bit patterns
//! instead of erroring, and the fractional part is truncated, never rounded.

use serde::{Deserialize, Serialize};

/// Shape of one fixed-point variable inside a binary genome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Whether the field carries a leading sign bit (`true` = negative).
    pub signed: bool,
    /// Number of integer magnitude bits.
    pub integer_bits: u32,
    /// Number of fractional bits.
    pub fraction_bits: u32,
}

impl FieldSpec {
    /// Create a field spec. Magnitude is limited to 63 bits so the codec can
    /// work through `u64` intermediates.
    pub fn new(signed: bool, integer_bits: u32, fraction_bits: u32) -> Self {
        assert!(
            integer_bits + fraction_bits <= 63,
            "field magnitude limited to 63 bits"
        );
        Self {
            signed,
            integer_bits,
            fraction_bits,
        }
    }

    /// Total width of the field in bits, sign included.
    pub fn width(&self) -> usize {
        self.signed as usize + (self.integer_bits + self.fraction_bits) as usize
    }

    /// Value of one fractional step: `2^-fraction_bits`.
    pub fn scale(&self) -> f64 {
        1.0 / (1u64 << self.fraction_bits) as f64
    }

    /// Largest representable magnitude:
    /// `(2^i - 1) + (2^f - 1) / 2^f`.
    pub fn max_magnitude(&self) -> f64 {
        let int_max = ((1u64 << self.integer_bits) - 1) as f64;
        let frac_max = ((1u64 << self.fraction_bits) - 1) as f64 / (1u64 << self.fraction_bits) as f64;
        int_max + frac_max
    }
}

/// Encode one value into the field's bit pattern, MSB first.
pub fn encode_value(value: f64, spec: &FieldSpec) -> Vec<bool> {
    let magnitude_bits = (spec.integer_bits + spec.fraction_bits) as usize;
    // Negative into an unsigned field clamps to zero.
    if value < 0.0 && !spec.signed {
        return vec![false; magnitude_bits];
    }

    let mut bits = Vec::with_capacity(spec.width());
    if spec.signed {
        bits.push(value < 0.0);
    }

    let magnitude = value.abs();
    if magnitude >= spec.max_magnitude() {
        bits.resize(bits.len() + magnitude_bits, true);
        return bits;
    }

    let int_part = magnitude.trunc() as u64;
    for i in (0..spec.integer_bits).rev() {
        bits.push((int_part >> i) & 1 == 1);
    }
    let frac_part = (magnitude.fract() * (1u64 << spec.fraction_bits) as f64).floor() as u64;
    for i in (0..spec.fraction_bits).rev() {
        bits.push((frac_part >> i) & 1 == 1);
    }
    bits
}

/// Decode one field's bit pattern back into its value.
///
/// Panics when `bits` does not match the field width.
pub fn decode_value(bits: &[bool], spec: &FieldSpec) -> f64 {
    assert_eq!(bits.len(), spec.width(), "bit slice does not match field width");
    let (negative, magnitude) = if spec.signed {
        (bits[0], &bits[1..])
    } else {
        (false, bits)
    };

    let int_end = spec.integer_bits as usize;
    let int_part = magnitude[..int_end]
        .iter()
        .fold(0u64, |acc, &b| (acc << 1) | b as u64);
    let frac_part = magnitude[int_end..]
        .iter()
        .fold(0u64, |acc, &b| (acc << 1) | b as u64);

    let value = int_part as f64 + frac_part as f64 / (1u64 << spec.fraction_bits) as f64;
    if negative {
        -value
    } else {
        value
    }
}

/// Ordered collection of field specs describing one binary genome.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryLayout {
    fields: Vec<FieldSpec>,
    total_bits: usize,
}

impl BinaryLayout {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        let total_bits = fields.iter().map(FieldSpec::width).sum();
        Self { fields, total_bits }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Total genome width in bits.
    pub fn total_bits(&self) -> usize {
        self.total_bits
    }

    /// Number of encoded variables.
    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    /// Decode a flat bit slice into one value per field.
    ///
    /// Panics when the slice does not match the layout width.
    pub fn decode(&self, bits: &[bool]) -> Vec<f64> {
        assert_eq!(bits.len(), self.total_bits, "bit slice does not match layout width");
        let mut values = Vec::with_capacity(self.fields.len());
        let mut offset = 0;
        for spec in &self.fields {
            let width = spec.width();
            values.push(decode_value(&bits[offset..offset + width], spec));
            offset += width;
        }
        values
    }

    /// Encode one value per field into a flat bit vector.
    ///
    /// Panics when the value count does not match the layout arity.
    pub fn encode(&self, values: &[f64]) -> Vec<bool> {
        assert_eq!(values.len(), self.fields.len(), "value count does not match layout arity");
        let mut bits = Vec::with_capacity(self.total_bits);
        for (value, spec) in values.iter().zip(&self.fields) {
            bits.extend(encode_value(*value, spec));
        }
        bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn to_string(bits: &[bool]) -> String {
        bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
    }

    #[test]
    fn encodes_two_and_a_half_unsigned() {
        let spec = FieldSpec::new(false, 3, 2);
        assert_eq!(to_string(&encode_value(2.5, &spec)), "01010");
    }

    #[test]
    fn negative_into_unsigned_field_clamps_to_zero() {
        let spec = FieldSpec::new(false, 2, 2);
        assert_eq!(to_string(&encode_value(-1.0, &spec)), "0000");
    }

    #[test]
    fn saturates_at_and_above_the_maximum() {
        let spec = FieldSpec::new(false, 3, 2);
        assert_relative_eq!(spec.max_magnitude(), 7.75);
        assert_eq!(to_string(&encode_value(7.75, &spec)), "11111");
        assert_eq!(to_string(&encode_value(1_000.0, &spec)), "11111");

        let signed = FieldSpec::new(true, 3, 2);
        assert_eq!(to_string(&encode_value(-1_000.0, &signed)), "111111");
        assert_eq!(decode_value(&encode_value(-1_000.0, &signed), &signed), -7.75);
    }

    #[test]
    fn fraction_is_truncated_not_rounded() {
        let spec = FieldSpec::new(false, 3, 2);
        // 1.99 -> integer 1, fraction floor(0.99 * 4) = 3
        assert_eq!(to_string(&encode_value(1.99, &spec)), "00111");
        assert_relative_eq!(decode_value(&encode_value(1.99, &spec), &spec), 1.75);
    }

    #[test]
    fn signed_fields_carry_a_sign_bit() {
        let spec = FieldSpec::new(true, 3, 2);
        assert_eq!(to_string(&encode_value(-2.5, &spec)), "101010");
        assert_relative_eq!(decode_value(&encode_value(-2.5, &spec), &spec), -2.5);
        assert_eq!(to_string(&encode_value(2.5, &spec)), "001010");
    }

    #[test]
    fn zero_fraction_bits_encodes_integers_only() {
        let spec = FieldSpec::new(false, 4, 0);
        assert_eq!(spec.width(), 4);
        assert_eq!(to_string(&encode_value(9.9, &spec)), "1001");
        assert_relative_eq!(decode_value(&encode_value(9.9, &spec), &spec), 9.0);
    }

    #[test]
    fn scale_is_a_power_of_two_step() {
        assert_relative_eq!(FieldSpec::new(false, 3, 2).scale(), 0.25);
        assert_relative_eq!(FieldSpec::new(false, 3, 0).scale(), 1.0);
        assert_relative_eq!(FieldSpec::new(true, 5, 5).scale(), 1.0 / 32.0);
    }

    #[test]
    fn layout_round_trips_within_one_step() {
        let layout = BinaryLayout::new(vec![
            FieldSpec::new(true, 5, 5),
            FieldSpec::new(false, 3, 2),
        ]);
        assert_eq!(layout.total_bits(), 11 + 5);
        let values = [-13.71875, 4.3];
        let decoded = layout.decode(&layout.encode(&values));
        assert_relative_eq!(decoded[0], -13.71875);
        // 4.3 truncates down by less than one fractional step.
        assert!(decoded[1] <= 4.3 && 4.3 - decoded[1] < 0.25);
    }

    #[test]
    #[should_panic(expected = "layout width")]
    fn decoding_a_mismatched_slice_panics() {
        let layout = BinaryLayout::new(vec![FieldSpec::new(false, 2, 2)]);
        layout.decode(&[true, false]);
    }
}
