//! Resolución de coordenadas por país.
//!
//! Tabla fija de centros y cajas envolventes. Un país desconocido nunca es un
//! error: se devuelve `{0, 0}` y se deja un warning en el log.

use log::warn;
use rand::Rng;

use crate::domain::Coordinates;

struct CountryGeo {
  name: &'static str,
  center: Coordinates,
  min_lat: f64,
  max_lat: f64,
  min_lng: f64,
  max_lng: f64,
}

const fn country(
  name: &'static str,
  center: (f64, f64),
  lat: (f64, f64),
  lng: (f64, f64),
) -> CountryGeo {
  CountryGeo {
    name,
    center: Coordinates { lat: center.0, lng: center.1 },
    min_lat: lat.0,
    max_lat: lat.1,
    min_lng: lng.0,
    max_lng: lng.1,
  }
}

const COUNTRIES: &[CountryGeo] = &[
  country("United States", (37.0902, -95.7129), (24.3963, 49.3843), (-125.0000, -66.9346)),
  country("United Kingdom", (55.3781, -3.4360), (49.9195, 58.6350), (-8.1440, 1.7629)),
  country("Canada", (56.1304, -106.3468), (41.6755, 83.1106), (-141.0018, -52.6483)),
  country("Australia", (-25.2744, 133.7751), (-43.0031, -10.6681), (113.6594, 153.6119)),
  country("Germany", (51.1657, 10.4515), (47.2701, 55.0583), (5.8663, 15.0419)),
  country("France", (46.2276, 2.2137), (41.3039, 51.1242), (-5.1422, 9.5616)),
  country("Spain", (40.4637, -3.7492), (36.0001, 43.7902), (-9.3018, 4.3279)),
  country("Italy", (41.8719, 12.5674), (36.6447, 47.0921), (6.6272, 18.5204)),
  country("Brazil", (-14.2350, -51.9253), (-33.7683, 5.2718), (-73.9872, -34.7929)),
  country("India", (20.5937, 78.9629), (6.7557, 35.6743), (68.1867, 97.4152)),
  country("China", (35.8617, 104.1954), (18.1977, 53.5608), (73.6754, 135.0263)),
  country("Japan", (36.2048, 138.2529), (24.3963, 45.5515), (122.9339, 153.9869)),
  country("South Korea", (35.9078, 127.7669), (33.1909, 38.6235), (124.6120, 131.8729)),
  country("Russia", (61.5240, 105.3188), (41.1851, 82.0586), (19.6389, 180.0000)),
  country("Mexico", (23.6345, -102.5528), (14.5321, 32.7187), (-118.5989, -86.4930)),
  country("Argentina", (-38.4161, -63.6167), (-55.9160, -21.7813), (-73.5829, -53.6378)),
  country("South Africa", (-30.5595, 22.9375), (-34.8342, -22.1266), (16.3449, 32.8951)),
  country("Egypt", (26.8206, 30.8025), (22.0000, 31.6678), (24.6981, 36.8943)),
  country("Nigeria", (9.0820, 8.6753), (4.2704, 13.8920), (2.6917, 14.5772)),
  country("Kenya", (-1.2921, 36.8219), (-4.6769, 5.0199), (33.8939, 41.8551)),
];

/// Fracción de cada eje usada para los puntos aleatorios (centrada en el centro del país).
const RANDOM_SPAN: f64 = 0.2;

fn lookup(name: &str) -> Option<&'static CountryGeo> {
  COUNTRIES.iter().find(|c| c.name == name)
}

/// Centro de visualización del país, o `{0, 0}` si no está en la tabla.
pub fn center_of(country: &str) -> Coordinates {
  match lookup(country) {
    Some(geo) => geo.center,
    None => {
      warn!("No coordinates found for country: {country}");
      Coordinates::ORIGIN
    }
  }
}

/// Punto aleatorio alrededor del centro del país, dentro del ±10% del rango
/// de latitud y longitud de su caja. Se usa para ubicar envíos nuevos.
pub fn random_point_in<R: Rng + ?Sized>(country: &str, rng: &mut R) -> Coordinates {
  let Some(geo) = lookup(country) else {
    warn!("No boundary data found for country: {country}");
    return Coordinates::ORIGIN;
  };

  let lat_range = (geo.max_lat - geo.min_lat) * RANDOM_SPAN;
  let lng_range = (geo.max_lng - geo.min_lng) * RANDOM_SPAN;

  Coordinates {
    lat: geo.center.lat + rng.gen_range(0.0..1.0) * lat_range - lat_range / 2.0,
    lng: geo.center.lng + rng.gen_range(0.0..1.0) * lng_range - lng_range / 2.0,
  }
}

/// Países conocidos, en el orden de la tabla.
pub fn known_countries() -> impl Iterator<Item = &'static str> {
  COUNTRIES.iter().map(|c| c.name)
}

/// Posición 3D sobre una esfera de radio `radius` (para la vista de globo).
pub fn sphere_position(lat: f64, lng: f64, radius: f64) -> [f64; 3] {
  let (lat, lng) = (lat.to_radians(), lng.to_radians());
  [radius * lat.cos() * lng.cos(), radius * lat.sin(), radius * lat.cos() * lng.sin()]
}
