/// Port que convierte referencias de assets (rutas relativas, con `\`, ...) en URLs absolutas.
pub trait AssetResolver {
  /// URL reproducible del audio, o `None` si la referencia falta o no se puede resolver.
  fn resolve_audio_url(&self, reference: Option<&str>) -> Option<String>;

  /// URL absoluta de la imagen. Sin referencia devuelve la imagen por defecto.
  fn resolve_image_url(&self, reference: Option<&str>) -> String;
}
