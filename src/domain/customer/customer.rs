/// Data needed to insert a customer; the store assigns `cust_id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub phone: i32,
    pub email: String,
}

/// Partial replacement of customer fields
///
/// `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub phone: Option<i32>,
    pub email: Option<String>,
}

impl CustomerPatch {
    /// Returns true when the patch touches no field
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none() && self.email.is_none()
    }
}

/// Customer entity
///
/// # Invariants
/// - `id` is assigned by the store and never changes
/// - name, phone and email are always present
///
/// # Example
/// ```
/// use customer_service::domain::customer::{Customer, CustomerPatch};
///
/// let mut customer = Customer::from_persistence(
///     1,
///     "Carmen Yip".to_string(),
///     98765432,
///     "carmenyip@abc.com".to_string(),
/// );
/// customer.apply(CustomerPatch {
///     email: Some("carmen@abc.com".to_string()),
///     ..CustomerPatch::default()
/// });
///
/// assert_eq!(customer.email(), "carmen@abc.com");
/// assert_eq!(customer.name(), "Carmen Yip");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    id: i32,
    name: String,
    phone: i32,
    email: String,
}

impl Customer {
    /// Reconstitutes a customer from a stored row
    pub fn from_persistence(id: i32, name: String, phone: i32, email: String) -> Self {
        Self {
            id,
            name,
            phone,
            email,
        }
    }

    /// Builds the stored form of a new customer once the store has picked an id
    pub fn from_new(id: i32, new: NewCustomer) -> Self {
        Self::from_persistence(id, new.name, new.phone, new.email)
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> i32 {
        self.phone
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Replaces every field the patch carries, leaving the rest untouched
    pub fn apply(&mut self, patch: CustomerPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
    }
}
