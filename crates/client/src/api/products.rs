//! Product catalog and admin product management.
//!
//! Listing is available to everyone; create/update/delete are
//! administrator operations (the server enforces the role, the UI layer
//! gates the views). Creates and updates go out as multipart forms so a
//! product image can ride along.

use tracing::instrument;

use shopfront_core::{Price, Product, ProductId};

use crate::api::ApiClient;
use crate::error::Result;
use crate::transport::{ApiRequest, FormPart, FormValue, Method, Transport};

/// Input for creating or updating a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Product display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Initial stock count.
    pub stock: u32,
    /// Optional image to upload with the product.
    pub image: Option<ImageUpload>,
}

/// An image file to attach to a product create/update.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// File name reported to the server.
    pub file_name: String,
    /// MIME type, e.g. `image/png`.
    pub content_type: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl NewProduct {
    /// Flatten into multipart form parts (`name`, `price`, `stock`, and
    /// an optional `image` file part).
    fn into_parts(self) -> Vec<FormPart> {
        let mut parts = vec![
            FormPart {
                name: "name".to_string(),
                value: FormValue::Text(self.name),
            },
            FormPart {
                name: "price".to_string(),
                value: FormValue::Text(self.price.to_string()),
            },
            FormPart {
                name: "stock".to_string(),
                value: FormValue::Text(self.stock.to_string()),
            },
        ];
        if let Some(image) = self.image {
            parts.push(FormPart {
                name: "image".to_string(),
                value: FormValue::File {
                    file_name: image.file_name,
                    content_type: image.content_type,
                    bytes: image.bytes,
                },
            });
        }
        parts
    }
}

impl<T: Transport> ApiClient<T> {
    /// Fetch the product catalog.
    ///
    /// Also refreshes the session store's product snapshot, which views
    /// read for display. Stock counts are advisory as of fetch time.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>> {
        let products: Vec<Product> = self.execute(ApiRequest::get("/products")).await?;
        self.session().set_products(products.clone());
        Ok(products)
    }

    /// Create a product (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the
    /// input.
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn create_product(&self, product: NewProduct) -> Result<Product> {
        let request = ApiRequest::multipart(Method::Post, "/products", product.into_parts());
        self.execute(request).await
    }

    /// Update a product (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or the server
    /// rejects the input.
    #[instrument(skip(self, product), fields(id = %id, name = %product.name))]
    pub async fn update_product(&self, id: ProductId, product: NewProduct) -> Result<Product> {
        let request =
            ApiRequest::multipart(Method::Put, format!("/products/{id}"), product.into_parts());
        self.execute(request).await
    }

    /// Delete a product (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or the request
    /// fails.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId) -> Result<()> {
        self.execute_unit(ApiRequest::delete(format!("/products/{id}")))
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_into_parts_without_image() {
        let parts = NewProduct {
            name: "Kettle".to_string(),
            price: Price::from(1000),
            stock: 12,
            image: None,
        }
        .into_parts();

        let names: Vec<&str> = parts.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["name", "price", "stock"]);
        assert!(matches!(
            &parts.get(1).unwrap().value,
            FormValue::Text(price) if price == "1000"
        ));
    }

    #[test]
    fn test_into_parts_appends_image_file() {
        let parts = NewProduct {
            name: "Kettle".to_string(),
            price: Price::from(1000),
            stock: 12,
            image: Some(ImageUpload {
                file_name: "kettle.png".to_string(),
                content_type: "image/png".to_string(),
                bytes: vec![0x89, 0x50],
            }),
        }
        .into_parts();

        assert_eq!(parts.len(), 4);
        assert!(matches!(
            &parts.last().unwrap().value,
            FormValue::File { file_name, .. } if file_name == "kettle.png"
        ));
    }
}
