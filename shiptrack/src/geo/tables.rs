//! Static geographic reference tables.
//!
//! Keys in [`CITY_TABLE`] are already normalized (lowercase ASCII, single
//! spaces) so lookups can compare against [`super::normalize_name`] output.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::types::GeoPoint;

/// Fallback when neither the city nor the state resolves.
///
/// Geographic centre of Brazil; keeps unknown shipments on the map.
pub const DEFAULT_POINT: GeoPoint = GeoPoint::new(-14.2350, -51.9253);

/// State capitals: (state code, normalized state name, capital position).
const STATE_CAPITALS: &[(&str, &str, GeoPoint)] = &[
    ("AC", "acre", GeoPoint::new(-9.9754, -67.8249)),
    ("AL", "alagoas", GeoPoint::new(-9.6658, -35.7353)),
    ("AP", "amapa", GeoPoint::new(0.0349, -51.0694)),
    ("AM", "amazonas", GeoPoint::new(-3.1190, -60.0217)),
    ("BA", "bahia", GeoPoint::new(-12.9777, -38.5016)),
    ("CE", "ceara", GeoPoint::new(-3.7319, -38.5267)),
    ("DF", "distrito federal", GeoPoint::new(-15.7801, -47.9292)),
    ("ES", "espirito santo", GeoPoint::new(-20.3155, -40.3128)),
    ("GO", "goias", GeoPoint::new(-16.6869, -49.2648)),
    ("MA", "maranhao", GeoPoint::new(-2.5307, -44.3068)),
    ("MT", "mato grosso", GeoPoint::new(-15.6014, -56.0979)),
    ("MS", "mato grosso do sul", GeoPoint::new(-20.4697, -54.6201)),
    ("MG", "minas gerais", GeoPoint::new(-19.9167, -43.9345)),
    ("PA", "para", GeoPoint::new(-1.4558, -48.4902)),
    ("PB", "paraiba", GeoPoint::new(-7.1195, -34.8450)),
    ("PR", "parana", GeoPoint::new(-25.4284, -49.2733)),
    ("PE", "pernambuco", GeoPoint::new(-8.0476, -34.8770)),
    ("PI", "piaui", GeoPoint::new(-5.0920, -42.8038)),
    ("RJ", "rio de janeiro", GeoPoint::new(-22.9068, -43.1729)),
    ("RN", "rio grande do norte", GeoPoint::new(-5.7945, -35.2110)),
    ("RS", "rio grande do sul", GeoPoint::new(-30.0346, -51.2177)),
    ("RO", "rondonia", GeoPoint::new(-8.7612, -63.9004)),
    ("RR", "roraima", GeoPoint::new(2.8235, -60.6758)),
    ("SC", "santa catarina", GeoPoint::new(-27.5954, -48.5480)),
    ("SP", "sao paulo", GeoPoint::new(-23.5505, -46.6333)),
    ("SE", "sergipe", GeoPoint::new(-10.9472, -37.0731)),
    ("TO", "tocantins", GeoPoint::new(-10.1840, -48.3336)),
];

/// Major cities, keyed by normalized name.
const MAJOR_CITIES: &[(&str, GeoPoint)] = &[
    // Capitals
    ("rio branco", GeoPoint::new(-9.9754, -67.8249)),
    ("maceio", GeoPoint::new(-9.6658, -35.7353)),
    ("macapa", GeoPoint::new(0.0349, -51.0694)),
    ("manaus", GeoPoint::new(-3.1190, -60.0217)),
    ("salvador", GeoPoint::new(-12.9777, -38.5016)),
    ("fortaleza", GeoPoint::new(-3.7319, -38.5267)),
    ("brasilia", GeoPoint::new(-15.7801, -47.9292)),
    ("vitoria", GeoPoint::new(-20.3155, -40.3128)),
    ("goiania", GeoPoint::new(-16.6869, -49.2648)),
    ("sao luis", GeoPoint::new(-2.5307, -44.3068)),
    ("cuiaba", GeoPoint::new(-15.6014, -56.0979)),
    ("campo grande", GeoPoint::new(-20.4697, -54.6201)),
    ("belo horizonte", GeoPoint::new(-19.9167, -43.9345)),
    ("belem", GeoPoint::new(-1.4558, -48.4902)),
    ("joao pessoa", GeoPoint::new(-7.1195, -34.8450)),
    ("curitiba", GeoPoint::new(-25.4284, -49.2733)),
    ("recife", GeoPoint::new(-8.0476, -34.8770)),
    ("teresina", GeoPoint::new(-5.0920, -42.8038)),
    ("rio de janeiro", GeoPoint::new(-22.9068, -43.1729)),
    ("natal", GeoPoint::new(-5.7945, -35.2110)),
    ("porto alegre", GeoPoint::new(-30.0346, -51.2177)),
    ("porto velho", GeoPoint::new(-8.7612, -63.9004)),
    ("boa vista", GeoPoint::new(2.8235, -60.6758)),
    ("florianopolis", GeoPoint::new(-27.5954, -48.5480)),
    ("sao paulo", GeoPoint::new(-23.5505, -46.6333)),
    ("aracaju", GeoPoint::new(-10.9472, -37.0731)),
    ("palmas", GeoPoint::new(-10.1840, -48.3336)),
    // Metropolitan and regional hubs
    ("campinas", GeoPoint::new(-22.9099, -47.0626)),
    ("guarulhos", GeoPoint::new(-23.4543, -46.5337)),
    ("santos", GeoPoint::new(-23.9608, -46.3336)),
    ("sao jose dos campos", GeoPoint::new(-23.2237, -45.9009)),
    ("ribeirao preto", GeoPoint::new(-21.1775, -47.8103)),
    ("sorocaba", GeoPoint::new(-23.5015, -47.4526)),
    ("osasco", GeoPoint::new(-23.5329, -46.7917)),
    ("santo andre", GeoPoint::new(-23.6639, -46.5383)),
    ("sao bernardo do campo", GeoPoint::new(-23.6914, -46.5646)),
    ("uberlandia", GeoPoint::new(-18.9186, -48.2772)),
    ("contagem", GeoPoint::new(-19.9317, -44.0536)),
    ("juiz de fora", GeoPoint::new(-21.7642, -43.3503)),
    ("niteroi", GeoPoint::new(-22.8832, -43.1034)),
    ("duque de caxias", GeoPoint::new(-22.7856, -43.3117)),
    ("nova iguacu", GeoPoint::new(-22.7592, -43.4510)),
    ("sao goncalo", GeoPoint::new(-22.8268, -43.0634)),
    ("joinville", GeoPoint::new(-26.3045, -48.8487)),
    ("blumenau", GeoPoint::new(-26.9194, -49.0661)),
    ("londrina", GeoPoint::new(-23.3045, -51.1696)),
    ("maringa", GeoPoint::new(-23.4205, -51.9333)),
    ("ponta grossa", GeoPoint::new(-25.0945, -50.1633)),
    ("foz do iguacu", GeoPoint::new(-25.5163, -54.5854)),
    ("caxias do sul", GeoPoint::new(-29.1678, -51.1794)),
    ("pelotas", GeoPoint::new(-31.7654, -52.3376)),
    ("feira de santana", GeoPoint::new(-12.2664, -38.9663)),
    ("jaboatao dos guararapes", GeoPoint::new(-8.1130, -35.0150)),
    ("caruaru", GeoPoint::new(-8.2842, -35.9699)),
    ("petrolina", GeoPoint::new(-9.3891, -40.5030)),
    ("campina grande", GeoPoint::new(-7.2307, -35.8817)),
    ("mossoro", GeoPoint::new(-5.1878, -37.3442)),
    ("imperatriz", GeoPoint::new(-5.5264, -47.4916)),
    ("santarem", GeoPoint::new(-2.4430, -54.7082)),
    ("ananindeua", GeoPoint::new(-1.3656, -48.3722)),
    ("aparecida de goiania", GeoPoint::new(-16.8198, -49.2469)),
    ("anapolis", GeoPoint::new(-16.3281, -48.9530)),
    ("vila velha", GeoPoint::new(-20.3297, -40.2925)),
    ("serra", GeoPoint::new(-20.1211, -40.3074)),
    ("dourados", GeoPoint::new(-22.2231, -54.8120)),
    ("rondonopolis", GeoPoint::new(-16.4673, -54.6372)),
];

/// Normalized city name -> position.
pub static CITY_TABLE: LazyLock<HashMap<&'static str, GeoPoint>> =
    LazyLock::new(|| MAJOR_CITIES.iter().copied().collect());

/// Upper-case state code -> capital position.
pub static STATE_CAPITAL_TABLE: LazyLock<HashMap<&'static str, GeoPoint>> =
    LazyLock::new(|| {
        STATE_CAPITALS
            .iter()
            .map(|(code, _, point)| (*code, *point))
            .collect()
    });

/// Normalized state name -> state code, so "São Paulo" resolves like "SP".
pub static STATE_NAME_TABLE: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| {
        STATE_CAPITALS
            .iter()
            .map(|(code, name, _)| (*name, *code))
            .collect()
    });

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_state_has_a_capital() {
        assert_eq!(STATE_CAPITAL_TABLE.len(), 27);
        assert_eq!(STATE_NAME_TABLE.len(), 27);
    }

    #[test]
    fn test_city_keys_are_normalized() {
        for key in CITY_TABLE.keys() {
            assert_eq!(*key, super::super::normalize_name(key), "key {key:?}");
        }
    }

    #[test]
    fn test_capitals_lie_within_brazil_bounds() {
        for point in STATE_CAPITAL_TABLE.values().chain(CITY_TABLE.values()) {
            assert!((-34.0..=6.0).contains(&point.lat), "{point}");
            assert!((-74.0..=-34.0).contains(&point.lng), "{point}");
        }
    }
}
