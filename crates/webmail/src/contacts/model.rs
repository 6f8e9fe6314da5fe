//! Contact and address book entry types.

use serde::{Deserialize, Serialize};

use crate::types::{KId, UtcDateTime, Watermark};

/// Address book group membership of a field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ABExtension {
    /// Extension group id.
    pub group_id: String,
    /// Custom label.
    pub label: String,
}

/// Kind of postal address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostalAddressType {
    /// Home.
    #[serde(rename = "AddressHome")]
    Home,
    /// Work.
    #[default]
    #[serde(rename = "AddressWork")]
    Work,
    /// Other.
    #[serde(rename = "AddressOther")]
    Other,
    /// No type defined.
    #[serde(rename = "AddressCustom")]
    Custom,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

/// Postal address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostalAddress {
    /// Preferred entry of its kind.
    pub preferred: bool,
    /// Post office box.
    pub pobox: String,
    /// Apartment or suite number.
    pub extended_address: String,
    /// Street.
    pub street: String,
    /// City.
    pub locality: String,
    /// State or province.
    pub state: String,
    /// Postal code.
    pub zip: String,
    /// Full country name.
    pub country: String,
    /// Formatted address.
    pub label: String,
    /// Address kind.
    #[serde(rename = "type")]
    pub kind: PostalAddressType,
    /// Address book extension data.
    pub extension: ABExtension,
}

/// Kind of email address entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmailAddressType {
    /// Work.
    #[default]
    #[serde(rename = "EmailWork")]
    Work,
    /// Home.
    #[serde(rename = "EmailHome")]
    Home,
    /// Other.
    #[serde(rename = "EmailOther")]
    Other,
    /// Custom label.
    #[serde(rename = "EmailCustom")]
    Custom,
    /// Reference to an existing contact.
    RefContact,
    /// Reference to an existing distribution list.
    RefDistributionList,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

/// Email address entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmailAddress {
    /// Email address.
    pub address: String,
    /// Name.
    pub name: String,
    /// Preferred entry of its kind.
    pub preferred: bool,
    /// A valid certificate exists for the address.
    pub is_valid_certificate: bool,
    /// Address kind.
    #[serde(rename = "type")]
    pub kind: EmailAddressType,
    /// Referenced contact or list, for the `Ref*` kinds.
    pub ref_id: KId,
    /// Address book extension data.
    pub extension: ABExtension,
}

impl EmailAddress {
    /// Creates a work address.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Self::default()
        }
    }
}

/// Kind of phone number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhoneNumberType {
    /// Assistant.
    #[serde(rename = "TypeAssistant")]
    Assistant,
    /// Work voice.
    #[default]
    #[serde(rename = "TypeWorkVoice")]
    WorkVoice,
    /// Work fax.
    #[serde(rename = "TypeWorkFax")]
    WorkFax,
    /// Callback.
    #[serde(rename = "TypeCallback")]
    Callback,
    /// Car.
    #[serde(rename = "TypeCar")]
    Car,
    /// Company.
    #[serde(rename = "TypeCompany")]
    Company,
    /// Home voice.
    #[serde(rename = "TypeHomeVoice")]
    HomeVoice,
    /// Home fax.
    #[serde(rename = "TypeHomeFax")]
    HomeFax,
    /// ISDN.
    #[serde(rename = "TypeIsdn")]
    Isdn,
    /// Mobile.
    #[serde(rename = "TypeMobile")]
    Mobile,
    /// Other voice.
    #[serde(rename = "TypeOtherVoice")]
    OtherVoice,
    /// Other fax.
    #[serde(rename = "TypeOtherFax")]
    OtherFax,
    /// Pager.
    #[serde(rename = "TypePager")]
    Pager,
    /// Primary.
    #[serde(rename = "TypePrimary")]
    Primary,
    /// Radio.
    #[serde(rename = "TypeRadio")]
    Radio,
    /// Telex.
    #[serde(rename = "TypeTelex")]
    Telex,
    /// TTY/TDD.
    #[serde(rename = "TypeTtyTdd")]
    TtyTdd,
    /// Custom label.
    #[serde(rename = "TypeCustom")]
    Custom,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

/// Phone number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhoneNumber {
    /// Number kind.
    #[serde(rename = "type")]
    pub kind: PhoneNumberType,
    /// Number.
    pub number: String,
    /// Address book extension data.
    pub extension: ABExtension,
}

/// Kind of web address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UrlType {
    /// Home.
    #[serde(rename = "UrlHome")]
    Home,
    /// Work.
    #[default]
    #[serde(rename = "UrlWork")]
    Work,
    /// Other.
    #[serde(rename = "UrlOther")]
    Other,
    /// Custom label.
    #[serde(rename = "UrlCustom")]
    Custom,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

/// Web address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Url {
    /// Address kind.
    #[serde(rename = "type")]
    pub kind: UrlType,
    /// Address.
    pub url: String,
    /// Address book extension data.
    pub extension: ABExtension,
}

/// Contact photo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoAttachment {
    /// Original attachment id or id from an upload response.
    pub id: String,
    /// Read-only.
    pub url: String,
}

/// Contact or distribution list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactType {
    /// Contact.
    #[default]
    #[serde(rename = "ctContact")]
    Contact,
    /// Distribution list.
    #[serde(rename = "ctDistributionList")]
    DistributionList,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

/// Address book entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    /// Contact id.
    pub id: KId,
    /// Folder holding the item.
    pub folder_id: KId,
    /// Item version.
    pub watermark: Watermark,
    /// Single contact or distribution list.
    #[serde(rename = "type")]
    pub kind: ContactType,
    /// Full name as displayed.
    pub common_name: String,
    /// First name.
    pub first_name: String,
    /// Middle name.
    pub middle_name: String,
    /// Surname.
    pub sur_name: String,
    /// Title before the name.
    pub title_before: String,
    /// Title after the name.
    pub title_after: String,
    /// Nickname.
    pub nick_name: String,
    /// Phone numbers.
    pub phone_numbers: Vec<PhoneNumber>,
    /// Email addresses.
    pub email_addresses: Vec<EmailAddress>,
    /// Postal addresses.
    pub postal_addresses: Vec<PostalAddress>,
    /// Web addresses.
    pub urls: Vec<Url>,
    /// Birthday.
    pub birth_day: UtcDateTime,
    /// Anniversary.
    pub anniversary: UtcDateTime,
    /// Company.
    pub company_name: String,
    /// Department.
    pub department_name: String,
    /// Profession.
    pub profession: String,
    /// Manager.
    pub manager_name: String,
    /// Assistant.
    pub assistant_name: String,
    /// Free-form note.
    pub comment: String,
    /// Instant messaging address.
    #[serde(rename = "IMAddress")]
    pub im_address: String,
    /// Photo.
    pub photo: PhotoAttachment,
    /// Category names.
    pub categories: Vec<String>,
    /// Write-only: certificate to attach, taken from a mail.
    pub cert_source_id: KId,
    /// Read-only.
    pub is_gal_contact: bool,
}

impl Contact {
    /// Creates a contact in `folder_id` with a single email address.
    #[must_use]
    pub fn new(
        folder_id: KId,
        first_name: impl Into<String>,
        sur_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            folder_id,
            first_name: first_name.into(),
            sur_name: sur_name.into(),
            email_addresses: vec![EmailAddress {
                preferred: true,
                ..EmailAddress::new(email)
            }],
            ..Self::default()
        }
    }

    /// Returns the preferred email address, or the first one.
    #[must_use]
    pub fn preferred_email(&self) -> Option<&str> {
        self.email_addresses
            .iter()
            .find(|e| e.preferred)
            .or_else(|| self.email_addresses.first())
            .map(|e| e.address.as_str())
    }

    /// Returns a display string for the contact.
    ///
    /// Uses the common name if set, otherwise first and last name.
    #[must_use]
    pub fn display_name(&self) -> String {
        if !self.common_name.is_empty() {
            return self.common_name.clone();
        }
        [self.first_name.as_str(), self.sur_name.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Card of the logged-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalContact {
    /// Full name as displayed.
    pub common_name: String,
    /// First name.
    pub first_name: String,
    /// Middle name.
    pub middle_name: String,
    /// Surname.
    pub sur_name: String,
    /// Title before the name.
    pub title_before: String,
    /// Title after the name.
    pub title_after: String,
    /// Nickname.
    pub nick_name: String,
    /// Work phone.
    pub phone_number_work_voice: String,
    /// Mobile phone.
    pub phone_number_mobile: String,
    /// Work address.
    pub postal_address_work: PostalAddress,
    /// Work web address.
    pub url_work: String,
    /// Birthday.
    pub birth_day: UtcDateTime,
    /// Anniversary.
    pub anniversary: UtcDateTime,
    /// Company.
    pub company_name: String,
    /// Department.
    pub department_name: String,
    /// Profession.
    pub profession: String,
    /// Manager.
    pub manager_name: String,
    /// Assistant.
    pub assistant_name: String,
    /// Free-form note.
    pub comment: String,
    /// Instant messaging address.
    #[serde(rename = "IMAddress")]
    pub im_address: String,
    /// Photo.
    pub photo: PhotoAttachment,
    /// Cannot be modified.
    pub is_read_only: bool,
    /// Email addresses.
    pub email_addresses: Vec<EmailAddress>,
}

/// Kind of bookable resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceType {
    /// Room.
    #[default]
    #[serde(rename = "ResourceRoom")]
    Room,
    /// Anything else, e.g. a car.
    #[serde(rename = "ResourceEquipment")]
    Equipment,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

/// Bookable resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resource {
    /// Resource name.
    pub name: String,
    /// Email address of the resource.
    pub address: String,
    /// Description.
    pub description: String,
    /// Room or equipment.
    #[serde(rename = "type")]
    pub kind: ResourceType,
}
